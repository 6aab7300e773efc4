// New-year greeting modal: payloads, page layout and per-page effect cues.

use super::scheduler::Cue;
use super::tier::DeviceTier;
use crate::constants::SUPPORTERS_PER_PAGE;
use serde::Deserialize;
use smallvec::SmallVec;

pub use super::wishes::{validate_supporter_greeting, SupporterGreetingRequest};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GreetingCheck {
    pub can_send_supporter_greeting: bool,
    pub is_superadmin: bool,
    pub should_show: bool,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Greeting {
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GreetingSet {
    pub clb_wishes: Vec<Greeting>,
    pub superadmin_wishes: Vec<Greeting>,
    pub supporter_wishes: Vec<Greeting>,
    pub ending: Option<Greeting>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GreetingList {
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub greetings: GreetingSet,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GreetingPage {
    Intro,
    ClbWish(Greeting),
    SuperadminWish(Greeting),
    Supporters(Vec<Greeting>),
    /// `None` renders the built-in closing page.
    Ending(Option<Greeting>),
}

impl GreetingPage {
    pub fn class_name(&self) -> &'static str {
        match self {
            GreetingPage::Intro => "intro",
            GreetingPage::ClbWish(_) => "clb_wish",
            GreetingPage::SuperadminWish(_) => "superadmin_wish",
            GreetingPage::Supporters(_) => "supporter_wishes",
            GreetingPage::Ending(_) => "ending",
        }
    }
}

/// Lays the greetings out in display order. Always starts with the intro
/// and finishes with an ending page.
pub fn build_pages(set: &GreetingSet) -> Vec<GreetingPage> {
    let mut pages = vec![GreetingPage::Intro];
    pages.extend(set.clb_wishes.iter().cloned().map(GreetingPage::ClbWish));
    pages.extend(
        set.superadmin_wishes
            .iter()
            .cloned()
            .map(GreetingPage::SuperadminWish),
    );
    pages.extend(
        set.supporter_wishes
            .chunks(SUPPORTERS_PER_PAGE)
            .map(|chunk| GreetingPage::Supporters(chunk.to_vec())),
    );
    pages.push(GreetingPage::Ending(set.ending.clone()));
    pages
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerStep {
    Moved(usize),
    /// Next pressed on the last page: mark seen and close.
    Finish,
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total: usize,
}

impl Pager {
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.total
    }

    pub fn next_label(&self) -> &'static str {
        if self.is_last() {
            "✓ Hoàn thành"
        } else {
            "Tiếp theo ❯"
        }
    }

    pub fn next(&mut self) -> PagerStep {
        if self.is_last() {
            PagerStep::Finish
        } else {
            self.go_to(self.current + 1)
        }
    }

    pub fn prev(&mut self) -> PagerStep {
        match self.current.checked_sub(1) {
            Some(i) => self.go_to(i),
            None => PagerStep::Unchanged,
        }
    }

    pub fn go_to(&mut self, index: usize) -> PagerStep {
        if index >= self.total {
            return PagerStep::Unchanged;
        }
        self.current = index;
        PagerStep::Moved(index)
    }
}

pub type PageCues = SmallVec<[(u64, Cue); 8]>;

/// Effects fired when a page is shown, as `(delay_ms, cue)` pairs.
pub fn page_cues(page: &GreetingPage, tier: DeviceTier) -> PageCues {
    let petal = Cue::ModalPetal(tier);
    let firework = Cue::ModalFirework(tier);
    let mut cues = PageCues::new();
    let mut push = |delays: &[u64], cue: &Cue| {
        cues.extend(delays.iter().map(|d| (*d, *cue)));
    };
    match (page, tier) {
        (GreetingPage::ClbWish(_) | GreetingPage::SuperadminWish(_), DeviceTier::VeryLow) => {
            push(&[200, 600], &petal);
        }
        (GreetingPage::ClbWish(_), DeviceTier::Low) => {
            push(&[200, 800], &firework);
            push(&[100, 500, 900], &petal);
        }
        (GreetingPage::ClbWish(_), DeviceTier::High) => {
            push(&[100, 400, 700], &firework);
            push(&[0, 200, 400, 600, 800], &petal);
        }
        (GreetingPage::SuperadminWish(_), DeviceTier::Low) => {
            push(&[0, 350, 700, 1050], &petal);
        }
        (GreetingPage::SuperadminWish(_), DeviceTier::High) => {
            let delays: SmallVec<[u64; 8]> = (0..8).map(|i| i * 150).collect();
            push(&delays, &petal);
        }
        _ => {}
    }
    cues
}
