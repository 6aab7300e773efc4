// Host-side tests for the effect scheduler. The crate itself only builds for
// wasm32, so the pure modules are pulled in by path.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core/mod.rs"]
mod core;

use crate::constants::{CELEBRATION_VOLLEYS, EXPLOSION_TTL_MS, FIREWORK_TTL_MS};
use crate::core::scheduler::GeneratorKind;
use crate::core::session::MemoryStore;
use crate::core::{
    Cue, DeviceTier, EffectParticle, EffectScheduler, EffectSurface, FrameInput, PageKind,
    ParticleId, ParticleKind, PerfSettings, SessionEffectsState, TickReport,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);
const FRAME_MS: f64 = 16.0;

#[derive(Default)]
struct FakeSurface {
    attached: HashMap<ParticleId, (ParticleKind, Option<f64>)>,
    attach_calls: usize,
    refuse: bool,
}

impl FakeSurface {
    fn count(&self, kind: ParticleKind) -> usize {
        self.attached.values().filter(|(k, _)| *k == kind).count()
    }
}

impl EffectSurface for FakeSurface {
    fn attach(&mut self, particle: &EffectParticle) -> bool {
        self.attach_calls += 1;
        if self.refuse {
            return false;
        }
        self.attached
            .insert(particle.id, (particle.kind(), particle.deadline_ms()));
        true
    }

    fn detach(&mut self, id: ParticleId) {
        self.attached.remove(&id);
    }
}

fn scheduler(tier: DeviceTier, mobile: bool) -> EffectScheduler<StdRng> {
    EffectScheduler::new(
        PerfSettings::for_tier(tier, mobile),
        StdRng::seed_from_u64(7),
        VIEWPORT,
    )
}

fn frame(now_ms: f64, tab_visible: bool) -> FrameInput {
    FrameInput {
        now_ms,
        tab_visible,
        viewport: VIEWPORT,
    }
}

fn session() -> SessionEffectsState<MemoryStore> {
    SessionEffectsState::new(MemoryStore::default())
}

#[test]
fn firework_is_removed_once_its_ttl_elapses() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    s.schedule(Cue::Firework, 0, 0.0);

    let report = s.tick(frame(0.0, true), &mut surface);
    assert_eq!(report.spawned, 1);
    assert_eq!(surface.count(ParticleKind::Firework), 1);

    let report = s.tick(frame(FIREWORK_TTL_MS as f64 - 1.0, true), &mut surface);
    assert_eq!(report.expired, 0);
    assert_eq!(surface.count(ParticleKind::Firework), 1);

    let report = s.tick(frame(FIREWORK_TTL_MS as f64, true), &mut surface);
    assert_eq!(report.expired, 1);
    assert!(surface.attached.is_empty());
    assert_eq!(s.live_count(), 0);
}

#[test]
fn rocket_explodes_when_it_reaches_the_apex() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    s.schedule(Cue::Rocket, 0, 0.0);
    s.tick(frame(0.0, true), &mut surface);
    assert_eq!(s.live_count_of(ParticleKind::Rocket), 1);

    // The slowest possible climb on this viewport takes about 1.1s.
    let report = s.tick(frame(2000.0, true), &mut surface);
    assert_eq!(report.expired, 1);
    assert_eq!(report.spawned, 1);
    assert_eq!(s.live_count_of(ParticleKind::Rocket), 0);
    assert_eq!(s.live_count_of(ParticleKind::Explosion), 1);

    s.tick(frame(2000.0 + EXPLOSION_TTL_MS as f64, true), &mut surface);
    assert_eq!(s.live_count(), 0);
    assert!(surface.attached.is_empty());
}

#[test]
fn no_particle_outlives_its_deadline_by_more_than_a_tick() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    let mut session = session();
    s.populate_petals(0.0, &mut surface);
    s.start(PageKind::About, &mut session, 0.0);

    let mut now = 0.0;
    while now < 30_000.0 {
        s.tick(frame(now, true), &mut surface);
        if (now as u64) % 400 == 0 {
            s.spawn_cursor_flower(Vec2::new(now as f32 % 1000.0, 300.0), now, &mut surface);
        }
        for (kind, deadline) in surface.attached.values() {
            if let Some(d) = deadline {
                assert!(*d > now, "{:?} still attached at {} (deadline {})", kind, now, d);
            }
        }
        assert_eq!(surface.attached.len(), s.live_count());
        now += FRAME_MS;
    }
    assert!(surface.attach_calls > s.perf().petal_count as usize);
}

#[test]
fn petals_loop_until_teardown() {
    let mut s = scheduler(DeviceTier::Low, false);
    let mut surface = FakeSurface::default();
    let spawned = s.populate_petals(0.0, &mut surface);
    assert_eq!(spawned, 10);

    s.tick(frame(1.0e9, true), &mut surface);
    assert_eq!(surface.count(ParticleKind::Petal), 10);

    s.teardown(&mut surface);
    assert!(surface.attached.is_empty());
}

#[test]
fn hidden_tab_skips_gated_generators_only() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    s.add_generator(
        GeneratorKind::AmbientFirework,
        Cue::Firework,
        1000,
        1.0,
        true,
        None,
        0.0,
    );
    s.add_generator(
        GeneratorKind::FloatingIcon,
        Cue::FloatingIcon,
        1000,
        1.0,
        false,
        None,
        0.0,
    );

    let report = s.tick(frame(1000.0, false), &mut surface);
    assert_eq!(report.spawned, 1);
    assert_eq!(surface.count(ParticleKind::Firework), 0);
    assert_eq!(surface.count(ParticleKind::FloatingIcon), 1);

    s.tick(frame(2000.0, true), &mut surface);
    assert_eq!(surface.count(ParticleKind::Firework), 1);
    assert_eq!(surface.count(ParticleKind::FloatingIcon), 2);
}

#[test]
fn stalled_generator_fires_once_and_resyncs() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    s.add_generator(
        GeneratorKind::AmbientFirework,
        Cue::Firework,
        1000,
        1.0,
        true,
        None,
        0.0,
    );

    let report = s.tick(frame(10_500.0, true), &mut surface);
    assert_eq!(report.spawned, 1);
    assert_eq!(s.generators()[0].next_due_ms(), 11_500.0);
}

#[test]
fn welcome_burst_runs_once_per_session() {
    let mut session = session();

    let mut first = scheduler(DeviceTier::High, false);
    first.start(PageKind::Home, &mut session, 0.0);
    let kinds: Vec<_> = first.generators().iter().map(|g| g.kind).collect();
    assert!(kinds.contains(&GeneratorKind::WelcomeBurst));
    assert_eq!(first.pending_count(), 0);

    let mut second = scheduler(DeviceTier::High, false);
    second.start(PageKind::Home, &mut session, 0.0);
    assert!(second
        .generators()
        .iter()
        .all(|g| g.kind != GeneratorKind::WelcomeBurst));
    // Three sky bursts and three rockets instead.
    assert_eq!(second.pending_count(), 6);
}

#[test]
fn welcome_burst_stops_after_its_repetitions() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    let mut session = session();
    s.start(PageKind::Home, &mut session, 0.0);
    let perf = s.perf().clone();

    let mut now = 0.0;
    for _ in 0..perf.welcome_bursts + 2 {
        now += perf.welcome_interval_ms as f64;
        s.tick(frame(now, true), &mut surface);
    }
    assert!(s
        .generators()
        .iter()
        .all(|g| g.kind != GeneratorKind::WelcomeBurst));
}

#[test]
fn homework_page_keeps_only_floating_icons() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut session = session();
    s.start(PageKind::Homework, &mut session, 0.0);
    let kinds: Vec<_> = s.generators().iter().map(|g| g.kind).collect();
    assert_eq!(kinds, vec![GeneratorKind::FloatingIcon]);
    assert_eq!(s.pending_count(), 0);
}

#[test]
fn homework_page_shows_no_fireworks_after_celebration() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut session = session();
    let mut surface = FakeSurface::default();
    s.start(PageKind::Homework, &mut session, 0.0);
    s.celebrate(0.0);
    s.schedule(Cue::Firework, 100, 0.0);
    s.schedule(Cue::Rocket, 100, 0.0);
    let mut now = 0.0;
    while now <= 10_000.0 {
        s.tick(frame(now, true), &mut surface);
        now += 100.0;
    }
    assert_eq!(surface.count(ParticleKind::Firework), 0);
    assert_eq!(surface.count(ParticleKind::Rocket), 0);
    assert_eq!(surface.count(ParticleKind::Explosion), 0);
    assert_eq!(s.live_count_of(ParticleKind::Firework), 0);
}

#[test]
fn very_low_tier_installs_no_ambient_effects() {
    let mut s = scheduler(DeviceTier::VeryLow, false);
    let mut session = session();
    s.start(PageKind::Home, &mut session, 0.0);
    assert!(s.generators().is_empty());
    assert_eq!(s.pending_count(), 0);
}

#[test]
fn low_tier_has_no_rocket_generator() {
    let mut s = scheduler(DeviceTier::Low, false);
    let mut session = session();
    s.start(PageKind::Home, &mut session, 0.0);
    assert!(s
        .generators()
        .iter()
        .all(|g| g.kind != GeneratorKind::AmbientRocket));
}

#[test]
fn cursor_trail_never_exceeds_its_cap() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    let cap = s.perf().max_cursor_flowers;
    for i in 0..(cap * 3) {
        s.spawn_cursor_flower(Vec2::new(i as f32 * 25.0, 100.0), 0.0, &mut surface);
        assert!(surface.count(ParticleKind::CursorFlower) <= cap);
    }
    assert_eq!(s.live_count_of(ParticleKind::CursorFlower), cap);
}

#[test]
fn cursor_trail_is_disabled_on_mobile() {
    let mut s = scheduler(DeviceTier::High, true);
    let mut surface = FakeSurface::default();
    assert_eq!(
        s.spawn_cursor_flower(Vec2::new(10.0, 10.0), 0.0, &mut surface),
        None
    );
    assert!(surface.attached.is_empty());
}

#[test]
fn celebration_fires_fireworks_and_rockets() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    s.celebrate(0.0);
    assert_eq!(s.pending_count(), CELEBRATION_VOLLEYS as usize);

    s.tick(frame(5000.0, true), &mut surface);
    assert_eq!(s.pending_count(), 0);
    assert_eq!(
        surface.count(ParticleKind::Firework),
        CELEBRATION_VOLLEYS as usize
    );
    assert_eq!(
        surface.count(ParticleKind::Rocket),
        CELEBRATION_VOLLEYS as usize
    );
}

#[test]
fn modal_fireworks_are_skipped_on_very_low_devices() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    s.schedule(Cue::ModalFirework(DeviceTier::VeryLow), 0, 0.0);
    s.schedule(Cue::ModalFirework(DeviceTier::Low), 0, 0.0);
    let report = s.tick(frame(0.0, true), &mut surface);
    assert_eq!(report.spawned, 1);
}

#[test]
fn refused_attach_is_not_tracked() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface {
        refuse: true,
        ..Default::default()
    };
    s.schedule(Cue::Firework, 0, 0.0);
    let report = s.tick(frame(0.0, true), &mut surface);
    assert_eq!(report.spawned, 0);
    assert_eq!(surface.attach_calls, 1);
    assert_eq!(s.live_count(), 0);
}

#[test]
fn teardown_removes_everything() {
    let mut s = scheduler(DeviceTier::High, false);
    let mut surface = FakeSurface::default();
    let mut session = session();
    s.populate_petals(0.0, &mut surface);
    s.start(PageKind::Home, &mut session, 0.0);
    s.schedule(Cue::Firework, 0, 0.0);
    s.tick(frame(0.0, true), &mut surface);
    s.spawn_cursor_flower(Vec2::new(50.0, 50.0), 0.0, &mut surface);
    assert!(!surface.attached.is_empty());

    s.teardown(&mut surface);
    assert!(surface.attached.is_empty());
    assert!(s.generators().is_empty());
    assert_eq!(s.pending_count(), 0);
    assert_eq!(s.live_count(), 0);

    let report = s.tick(frame(60_000.0, true), &mut surface);
    assert_eq!(report, TickReport::default());
}
