// Tick-driven effect scheduler.
//
// Every generator is an independent repeating timer; every spawned particle
// gets exactly one expiry deadline, checked at the start of each tick. A
// particle is therefore removed no later than one tick after its ttl.

use super::page::{AmbientRates, PageKind};
use super::particle::{
    self, EffectParticle, FollowUp, Layer, ParticleId, ParticleKind, ParticleSpec,
};
use super::session::{SessionEffectsState, SessionFlag, SessionStore};
use super::tier::{DeviceTier, PerfSettings};
use crate::constants::{
    CELEBRATION_STAGGER_MS, CELEBRATION_VOLLEYS, LIXI_CHANCE, SALVO_ROCKET_STAGGER_MS,
    SALVO_ROCKET_START_MS, SALVO_STAGGER_MS, SALVO_START_MS, WELCOME_STAGGER_MS,
};
use fnv::FnvHashMap;
use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;

/// Render target for particles. The browser implementation owns the DOM
/// nodes; tests use an in-memory fake.
pub trait EffectSurface {
    /// Render the particle. Returning `false` means its container is gone
    /// and the particle is dropped without being tracked.
    fn attach(&mut self, particle: &EffectParticle) -> bool;
    fn detach(&mut self, id: ParticleId);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Firework,
    Rocket,
    Explosion(Vec2),
    FloatingIcon,
    /// One repetition of the first-visit burst.
    WelcomeVolley,
    /// A single staggered shot inside a welcome volley.
    WelcomeShot,
    /// Firework plus rocket, fired when a superadmin wish is opened.
    Celebration,
    ModalPetal(DeviceTier),
    ModalFirework(DeviceTier),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    AmbientFirework,
    AmbientRocket,
    FloatingIcon,
    WelcomeBurst,
}

#[derive(Clone, Debug)]
pub struct Generator {
    pub kind: GeneratorKind,
    pub cue: Cue,
    pub interval_ms: u64,
    pub chance: f64,
    /// Skip firing while the tab is hidden.
    pub visibility_gated: bool,
    /// Firings left for one-shot bursts; `None` repeats until teardown.
    pub remaining: Option<u32>,
    next_due_ms: f64,
}

impl Generator {
    #[inline]
    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    due_ms: f64,
    cue: Cue,
    visibility_gated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub now_ms: f64,
    pub tab_visible: bool,
    pub viewport: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub expired: usize,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    kind: ParticleKind,
    deadline_ms: Option<f64>,
    on_expire: Option<FollowUp>,
}

pub struct EffectScheduler<R: Rng> {
    perf: PerfSettings,
    rng: R,
    viewport: Vec2,
    generators: Vec<Generator>,
    pending: Vec<Pending>,
    live: FnvHashMap<ParticleId, Tracked>,
    cursor_trail: VecDeque<ParticleId>,
    /// Set for pages that hide the firework layer.
    fireworks_hidden: bool,
    next_id: u64,
}

impl<R: Rng> EffectScheduler<R> {
    pub fn new(perf: PerfSettings, rng: R, viewport: Vec2) -> Self {
        Self {
            perf,
            rng,
            viewport,
            generators: Vec::new(),
            pending: Vec::new(),
            live: FnvHashMap::default(),
            cursor_trail: VecDeque::new(),
            fireworks_hidden: false,
            next_id: 1,
        }
    }

    #[inline]
    pub fn perf(&self) -> &PerfSettings {
        &self.perf
    }

    #[inline]
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_count_of(&self, kind: ParticleKind) -> usize {
        self.live.values().filter(|t| t.kind == kind).count()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Install the ambient generators for `page` and either the first-visit
    /// welcome burst or the shorter initial salvo.
    pub fn start<S: SessionStore>(
        &mut self,
        page: PageKind,
        session: &mut SessionEffectsState<S>,
        now_ms: f64,
    ) {
        if self.perf.lixi_enabled {
            self.add_generator(
                GeneratorKind::FloatingIcon,
                Cue::FloatingIcon,
                self.perf.lixi_interval_ms,
                LIXI_CHANCE,
                false,
                None,
                now_ms,
            );
        }
        if !page.shows_fireworks() {
            self.fireworks_hidden = true;
            log::info!("[scheduler] firework layer hidden on {:?} page", page);
            return;
        }
        let rates = AmbientRates::for_page(page, &self.perf);
        if self.perf.firework_enabled {
            if session.first_time(SessionFlag::WelcomeShown) {
                self.add_generator(
                    GeneratorKind::WelcomeBurst,
                    Cue::WelcomeVolley,
                    self.perf.welcome_interval_ms,
                    1.0,
                    true,
                    Some(self.perf.welcome_bursts),
                    now_ms,
                );
            } else {
                self.schedule_initial_salvo(now_ms);
            }
            self.add_generator(
                GeneratorKind::AmbientFirework,
                Cue::Firework,
                rates.firework_interval_ms,
                rates.firework_chance,
                true,
                None,
                now_ms,
            );
        } else {
            log::info!("[scheduler] fireworks disabled for performance");
        }
        if self.perf.bottom_firework_enabled {
            self.add_generator(
                GeneratorKind::AmbientRocket,
                Cue::Rocket,
                rates.rocket_interval_ms,
                rates.rocket_chance,
                true,
                None,
                now_ms,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_generator(
        &mut self,
        kind: GeneratorKind,
        cue: Cue,
        interval_ms: u64,
        chance: f64,
        visibility_gated: bool,
        remaining: Option<u32>,
        now_ms: f64,
    ) {
        self.generators.push(Generator {
            kind,
            cue,
            interval_ms: interval_ms.max(1),
            chance,
            visibility_gated,
            remaining,
            next_due_ms: now_ms + interval_ms.max(1) as f64,
        });
    }

    /// Run `cue` once after `delay_ms`, regardless of tab visibility.
    pub fn schedule(&mut self, cue: Cue, delay_ms: u64, now_ms: f64) {
        self.pending.push(Pending {
            due_ms: now_ms + delay_ms as f64,
            cue,
            visibility_gated: false,
        });
    }

    fn schedule_initial_salvo(&mut self, now_ms: f64) {
        let low = self.perf.tier.is_low_end();
        let count = if low { 1 } else { 3 };
        for i in 0..count {
            self.schedule(Cue::Firework, SALVO_START_MS + i * SALVO_STAGGER_MS, now_ms);
        }
        if self.perf.bottom_firework_enabled {
            let rockets = if low { 1 } else { 3 };
            for i in 0..rockets {
                self.schedule(
                    Cue::Rocket,
                    SALVO_ROCKET_START_MS + i * SALVO_ROCKET_STAGGER_MS,
                    now_ms,
                );
            }
        }
    }

    pub fn celebrate(&mut self, now_ms: f64) {
        if self.fireworks_hidden {
            return;
        }
        for i in 0..CELEBRATION_VOLLEYS {
            self.schedule(Cue::Celebration, i * CELEBRATION_STAGGER_MS, now_ms);
        }
    }

    /// Long-lived looping petals; they stay until teardown.
    pub fn populate_petals<Su: EffectSurface>(&mut self, now_ms: f64, surface: &mut Su) -> usize {
        let mut spawned = 0;
        for _ in 0..self.perf.petal_count {
            let spec = particle::petal(&mut self.rng);
            spawned += self.spawn(spec, now_ms, surface).is_some() as usize;
        }
        spawned
    }

    pub fn populate_snow<Su: EffectSurface>(
        &mut self,
        count: u32,
        dark_mode: bool,
        now_ms: f64,
        surface: &mut Su,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let spec = particle::snowflake(&mut self.rng, dark_mode);
            spawned += self.spawn(spec, now_ms, surface).is_some() as usize;
        }
        spawned
    }

    /// Drop a flower at the pointer. The oldest flower is retired early when
    /// the trail is at capacity.
    pub fn spawn_cursor_flower<Su: EffectSurface>(
        &mut self,
        at: Vec2,
        now_ms: f64,
        surface: &mut Su,
    ) -> Option<ParticleId> {
        if !self.perf.cursor_trail_enabled {
            return None;
        }
        while self.cursor_trail.len() >= self.perf.max_cursor_flowers.max(1) {
            match self.cursor_trail.pop_front() {
                Some(oldest) => {
                    self.retire(oldest, surface);
                }
                None => break,
            }
        }
        let spec = particle::cursor_flower(&mut self.rng, at);
        let id = self.spawn(spec, now_ms, surface)?;
        self.cursor_trail.push_back(id);
        Some(id)
    }

    pub fn tick<Su: EffectSurface>(&mut self, frame: FrameInput, surface: &mut Su) -> TickReport {
        let now = frame.now_ms;
        self.viewport = frame.viewport;
        let mut report = TickReport::default();

        // Expire first so a tick never observes an overdue particle.
        let due: Vec<ParticleId> = self
            .live
            .iter()
            .filter(|(_, t)| t.deadline_ms.map_or(false, |d| d <= now))
            .map(|(id, _)| *id)
            .collect();
        let mut follow_ups = Vec::new();
        for id in due {
            if let Some(follow) = self.retire(id, surface) {
                follow_ups.push(follow);
            }
            report.expired += 1;
        }
        for follow in follow_ups {
            match follow {
                FollowUp::Explode { at } => {
                    report.spawned += self.perform(Cue::Explosion(at), now, surface);
                }
            }
        }

        let mut ready = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now {
                ready.push(*p);
                false
            } else {
                true
            }
        });
        ready.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        for p in ready {
            if p.visibility_gated && !frame.tab_visible {
                continue;
            }
            report.spawned += self.perform(p.cue, now, surface);
        }

        let mut fired = Vec::new();
        for g in self.generators.iter_mut() {
            if g.next_due_ms > now {
                continue;
            }
            // Resync after a long stall instead of replaying missed firings.
            g.next_due_ms += g.interval_ms as f64;
            if g.next_due_ms <= now {
                g.next_due_ms = now + g.interval_ms as f64;
            }
            if g.visibility_gated && !frame.tab_visible {
                continue;
            }
            if let Some(left) = g.remaining.as_mut() {
                if *left == 0 {
                    continue;
                }
                *left -= 1;
            }
            if self.rng.gen::<f64>() < g.chance {
                fired.push(g.cue);
            }
        }
        self.generators.retain(|g| g.remaining != Some(0));
        for cue in fired {
            report.spawned += self.perform(cue, now, surface);
        }

        report
    }

    /// Remove every tracked particle and stop all generators.
    pub fn teardown<Su: EffectSurface>(&mut self, surface: &mut Su) {
        let ids: Vec<ParticleId> = self.live.keys().copied().collect();
        for id in ids {
            surface.detach(id);
        }
        self.live.clear();
        self.cursor_trail.clear();
        self.generators.clear();
        self.pending.clear();
        log::info!("[scheduler] torn down");
    }

    fn perform<Su: EffectSurface>(&mut self, cue: Cue, now: f64, surface: &mut Su) -> usize {
        match cue {
            Cue::Firework => {
                let spec = particle::firework(&mut self.rng, &self.perf, self.viewport);
                self.spawn(spec, now, surface).is_some() as usize
            }
            Cue::Rocket => {
                if !self.perf.bottom_firework_enabled {
                    return 0;
                }
                let spec = particle::rocket(&mut self.rng, self.viewport);
                self.spawn(spec, now, surface).is_some() as usize
            }
            Cue::Explosion(at) => {
                let spec = particle::explosion(&mut self.rng, &self.perf, at);
                self.spawn(spec, now, surface).is_some() as usize
            }
            Cue::FloatingIcon => {
                let spec = particle::floating_lixi(&mut self.rng, self.viewport);
                self.spawn(spec, now, surface).is_some() as usize
            }
            Cue::WelcomeVolley => {
                let shots = if self.perf.tier.is_low_end() {
                    1
                } else {
                    2 + self.rng.gen_range(0..3u64)
                };
                for w in 0..shots {
                    self.pending.push(Pending {
                        due_ms: now + (w * WELCOME_STAGGER_MS) as f64,
                        cue: Cue::WelcomeShot,
                        visibility_gated: true,
                    });
                }
                0
            }
            Cue::WelcomeShot => {
                let mut spawned = self.perform(Cue::Firework, now, surface);
                if self.rng.gen::<f64>() > 0.5 {
                    spawned += self.perform(Cue::Rocket, now, surface);
                }
                spawned
            }
            Cue::Celebration => {
                self.perform(Cue::Firework, now, surface) + self.perform(Cue::Rocket, now, surface)
            }
            Cue::ModalPetal(tier) => match particle::modal_petal(&mut self.rng, tier) {
                Some(spec) => self.spawn(spec, now, surface).is_some() as usize,
                None => 0,
            },
            Cue::ModalFirework(tier) => {
                match particle::modal_firework(&mut self.rng, tier, self.viewport) {
                    Some(spec) => self.spawn(spec, now, surface).is_some() as usize,
                    None => 0,
                }
            }
        }
    }

    fn spawn<Su: EffectSurface>(
        &mut self,
        spec: ParticleSpec,
        now_ms: f64,
        surface: &mut Su,
    ) -> Option<ParticleId> {
        if self.fireworks_hidden && spec.layer == Layer::Fireworks {
            return None;
        }
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        let particle = EffectParticle {
            id,
            spawn_ms: now_ms,
            spec,
        };
        if !surface.attach(&particle) {
            return None;
        }
        self.live.insert(
            id,
            Tracked {
                kind: particle.kind(),
                deadline_ms: particle.deadline_ms(),
                on_expire: particle.spec.on_expire,
            },
        );
        Some(id)
    }

    fn retire<Su: EffectSurface>(&mut self, id: ParticleId, surface: &mut Su) -> Option<FollowUp> {
        let tracked = self.live.remove(&id)?;
        surface.detach(id);
        if tracked.kind == ParticleKind::CursorFlower {
            self.cursor_trail.retain(|c| *c != id);
        }
        tracked.on_expire
    }
}
