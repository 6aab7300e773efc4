// Greeting modal layout, pager and per-page effect cues.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::api;
use crate::core::greeting::{
    build_pages, page_cues, Greeting, GreetingCheck, GreetingList, GreetingPage, GreetingSet,
    Pager, PagerStep,
};
use crate::core::{Cue, DeviceTier};

fn greeting(message: &str) -> Greeting {
    Greeting {
        title: None,
        message: message.to_string(),
        author: "CLB".to_string(),
    }
}

fn count(cues: &[(u64, Cue)], pred: fn(&Cue) -> bool) -> usize {
    cues.iter().filter(|(_, c)| pred(c)).count()
}

fn is_petal(cue: &Cue) -> bool {
    matches!(cue, Cue::ModalPetal(_))
}

fn is_firework(cue: &Cue) -> bool {
    matches!(cue, Cue::ModalFirework(_))
}

#[test]
fn pages_run_intro_to_ending_in_order() {
    let set = GreetingSet {
        clb_wishes: vec![greeting("a"), greeting("b")],
        superadmin_wishes: vec![greeting("c")],
        supporter_wishes: (0..13).map(|i| greeting(&i.to_string())).collect(),
        ending: None,
    };
    let pages = build_pages(&set);
    let classes: Vec<_> = pages.iter().map(GreetingPage::class_name).collect();
    assert_eq!(
        classes,
        vec![
            "intro",
            "clb_wish",
            "clb_wish",
            "superadmin_wish",
            "supporter_wishes",
            "supporter_wishes",
            "supporter_wishes",
            "ending",
        ]
    );
    match &pages[6] {
        GreetingPage::Supporters(chunk) => assert_eq!(chunk.len(), 1),
        other => panic!("unexpected page {:?}", other),
    }
}

#[test]
fn empty_set_still_has_intro_and_ending() {
    let pages = build_pages(&GreetingSet::default());
    assert_eq!(pages, vec![GreetingPage::Intro, GreetingPage::Ending(None)]);
}

#[test]
fn pager_walks_forward_and_finishes() {
    let mut pager = Pager::new(3);
    assert!(pager.is_first());
    assert_eq!(pager.prev(), PagerStep::Unchanged);
    assert_eq!(pager.next_label(), "Tiếp theo ❯");
    assert_eq!(pager.next(), PagerStep::Moved(1));
    assert_eq!(pager.next(), PagerStep::Moved(2));
    assert!(pager.is_last());
    assert_eq!(pager.next_label(), "✓ Hoàn thành");
    assert_eq!(pager.next(), PagerStep::Finish);
    assert_eq!(pager.current(), 2);
    assert_eq!(pager.prev(), PagerStep::Moved(1));
}

#[test]
fn pager_ignores_out_of_range_dots() {
    let mut pager = Pager::new(4);
    assert_eq!(pager.go_to(3), PagerStep::Moved(3));
    assert_eq!(pager.go_to(4), PagerStep::Unchanged);
    assert_eq!(pager.current(), 3);
    assert_eq!(Pager::new(0).total(), 1);
}

#[test]
fn cues_scale_with_device_tier() {
    let clb = GreetingPage::ClbWish(greeting("x"));
    let admin = GreetingPage::SuperadminWish(greeting("y"));

    let high = page_cues(&clb, DeviceTier::High);
    assert_eq!(count(&high, is_firework), 3);
    assert_eq!(count(&high, is_petal), 5);

    let low = page_cues(&clb, DeviceTier::Low);
    assert_eq!(count(&low, is_firework), 2);
    assert_eq!(count(&low, is_petal), 3);

    let very_low = page_cues(&clb, DeviceTier::VeryLow);
    assert_eq!(count(&very_low, is_firework), 0);
    assert_eq!(count(&very_low, is_petal), 2);

    assert_eq!(page_cues(&admin, DeviceTier::High).len(), 8);
    assert_eq!(page_cues(&admin, DeviceTier::Low).len(), 4);
    assert_eq!(page_cues(&admin, DeviceTier::VeryLow).len(), 2);
    assert!(page_cues(&admin, DeviceTier::High)
        .iter()
        .all(|(_, c)| *c == Cue::ModalPetal(DeviceTier::High)));
}

#[test]
fn plain_pages_have_no_cues() {
    for page in [
        GreetingPage::Intro,
        GreetingPage::Supporters(vec![greeting("z")]),
        GreetingPage::Ending(None),
    ] {
        assert!(page_cues(&page, DeviceTier::High).is_empty());
    }
}

#[test]
fn greeting_payloads_decode_from_envelopes() {
    let check = api::decode::<GreetingCheck>(
        r#"{"success":true,"should_show":true,"can_send_supporter_greeting":false}"#,
    )
    .and_then(|e| e.into_result())
    .expect("check payload");
    assert!(check.should_show);
    assert!(!check.is_superadmin);

    let list = api::decode::<GreetingList>(
        r#"{"success":true,"year":2026,"greetings":{
            "clb_wishes":[{"title":"Chúc mừng","message":"Hi","author":"CLB"}],
            "supporter_wishes":[{"message":"Vui","author":"An"}],
            "ending":{"message":"Bye"}
        }}"#,
    )
    .and_then(|e| e.into_result())
    .expect("list payload");
    assert_eq!(list.year, Some(2026));
    assert_eq!(list.greetings.clb_wishes[0].title.as_deref(), Some("Chúc mừng"));
    assert!(list.greetings.superadmin_wishes.is_empty());
    assert_eq!(build_pages(&list.greetings).len(), 4);
}
