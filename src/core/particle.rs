// Particle descriptions and the randomized generators that produce them.
//
// A generator only decides *what* a particle looks like and how long it
// lives; attaching it to the page and expiring it is the scheduler's job.

use super::tier::{DeviceTier, PerfSettings};
use crate::constants::{
    CURSOR_FLOWER_TTL_MS, EXPLOSION_TTL_MS, FIREWORK_TTL_MS, LIXI_TTL_MS, MODAL_FIREWORK_TTL_MS,
    ROCKET_SPEED_MIN_PX, ROCKET_SPEED_SPAN_PX, ROCKET_STEP_MS,
};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Petal,
    Snowflake,
    Spark,
    Twinkle,
    Rocket,
    Firework,
    Explosion,
    FloatingIcon,
    CursorFlower,
}

/// Which overlay container a particle is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Petals,
    Snow,
    Fireworks,
    Page,
    Modal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub text: &'static str,
    pub color: &'static str,
}

pub const PETAL_GLYPHS: [Glyph; 5] = [
    Glyph { text: "🌸", color: "#FFB6C1" },
    Glyph { text: "🌸", color: "#FF69B4" },
    Glyph { text: "✿", color: "#FFD700" },
    Glyph { text: "❀", color: "#FFA500" },
    Glyph { text: "✾", color: "#FFB6C1" },
];

pub const CURSOR_GLYPHS: [Glyph; 5] = [
    Glyph { text: "🌸", color: "#FFB6C1" },
    Glyph { text: "🌸", color: "#FF69B4" },
    Glyph { text: "✿", color: "#FFD700" },
    Glyph { text: "❀", color: "#FFA500" },
    Glyph { text: "🌺", color: "#FF6B6B" },
];

pub const SNOW_GLYPHS: [&str; 5] = ["❄", "❅", "❆", "•", "+"];

pub const FIREWORK_COLORS: [&str; 8] = [
    "#FF0000", "#FFD700", "#FF69B4", "#00FF00", "#87CEEB", "#FF4500", "#FFFF00", "#FF1493",
];

pub const TWINKLE_COLOR: &str = "#FFFFFF";
pub const SNOW_COLOR_DARK: &str = "#ffffff";
pub const SNOW_COLOR_LIGHT: &str = "#D42426";

/// Randomized look of one node. Units follow the layer: petals and snow use
/// `pos.x` in vw, everything else is in CSS pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualParams {
    pub pos: Vec2,
    pub size: f32,
    pub color: &'static str,
    pub glyph: &'static str,
    pub angle_deg: f32,
    pub distance: f32,
    pub duration_s: f32,
    pub delay_s: f32,
    pub sway_s: f32,
    pub spin_s: Option<f32>,
    pub opacity: f32,
    pub willow: bool,
    pub glow: bool,
}

/// A child of a burst container; removed together with its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub kind: ParticleKind,
    pub params: VisualParams,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowUp {
    Explode { at: Vec2 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub kind: ParticleKind,
    pub layer: Layer,
    /// `None` for looping decorations that live for the whole page session.
    pub ttl_ms: Option<u64>,
    pub params: VisualParams,
    pub sparks: Vec<Spark>,
    pub on_expire: Option<FollowUp>,
}

impl ParticleSpec {
    fn single(kind: ParticleKind, layer: Layer, ttl_ms: Option<u64>, params: VisualParams) -> Self {
        Self {
            kind,
            layer,
            ttl_ms,
            params,
            sparks: Vec::new(),
            on_expire: None,
        }
    }
}

/// A `ParticleSpec` that has been handed to the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectParticle {
    pub id: ParticleId,
    pub spawn_ms: f64,
    pub spec: ParticleSpec,
}

impl EffectParticle {
    #[inline]
    pub fn kind(&self) -> ParticleKind {
        self.spec.kind
    }

    #[inline]
    pub fn ttl_ms(&self) -> Option<u64> {
        self.spec.ttl_ms
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.spec.ttl_ms.map(|ttl| self.spawn_ms + ttl as f64)
    }
}

#[inline]
fn span<R: Rng>(rng: &mut R, min: f32, width: f32) -> f32 {
    min + rng.gen::<f32>() * width
}

#[inline]
fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

pub fn petal<R: Rng>(rng: &mut R) -> ParticleSpec {
    let glyph = pick(rng, &PETAL_GLYPHS);
    let params = VisualParams {
        pos: Vec2::new(span(rng, 0.0, 100.0), 0.0),
        size: span(rng, 15.0, 20.0),
        color: glyph.color,
        glyph: glyph.text,
        duration_s: span(rng, 10.0, 8.0),
        delay_s: span(rng, 0.0, 5.0),
        opacity: span(rng, 0.3, 0.5),
        sway_s: span(rng, 3.0, 4.0),
        ..Default::default()
    };
    ParticleSpec::single(ParticleKind::Petal, Layer::Petals, None, params)
}

pub fn snowflake<R: Rng>(rng: &mut R, dark_mode: bool) -> ParticleSpec {
    let params = VisualParams {
        pos: Vec2::new(span(rng, 0.0, 100.0), 0.0),
        size: span(rng, 10.0, 15.0),
        color: if dark_mode { SNOW_COLOR_DARK } else { SNOW_COLOR_LIGHT },
        glyph: pick(rng, &SNOW_GLYPHS),
        duration_s: span(rng, 10.0, 10.0),
        sway_s: span(rng, 3.0, 4.0),
        delay_s: span(rng, 0.0, 5.0),
        opacity: span(rng, 0.1, 0.4),
        spin_s: if rng.gen_bool(0.5) {
            Some(span(rng, 2.0, 4.0))
        } else {
            None
        },
        ..Default::default()
    };
    ParticleSpec::single(ParticleKind::Snowflake, Layer::Snow, None, params)
}

#[derive(Clone, Copy, Debug)]
struct BurstProfile {
    sparks: u32,
    base_size: f32,
    base_distance: f32,
}

// Size classes as (cumulative probability, min sparks, extra sparks, size, distance).
const TOP_CLASSES: [(f32, u32, u32, f32, f32); 4] = [
    (0.2, 10, 8, 4.0, 30.0),
    (0.5, 18, 10, 5.0, 50.0),
    (0.8, 28, 15, 6.0, 70.0),
    (1.0, 45, 25, 7.0, 90.0),
];

const EXPLOSION_CLASSES: [(f32, u32, u32, f32, f32); 4] = [
    (0.15, 15, 10, 4.0, 50.0),
    (0.45, 28, 15, 5.0, 80.0),
    (0.75, 45, 20, 6.0, 110.0),
    (1.0, 60, 30, 7.0, 140.0),
];

fn roll_profile<R: Rng>(
    rng: &mut R,
    classes: &[(f32, u32, u32, f32, f32)],
    spark_scale: f32,
) -> BurstProfile {
    let roll = rng.gen::<f32>();
    let &(_, min, extra, base_size, base_distance) = classes
        .iter()
        .find(|c| roll < c.0)
        .unwrap_or(&classes[classes.len() - 1]);
    let sparks = min + rng.gen_range(0..extra);
    BurstProfile {
        sparks: (sparks as f32 * spark_scale).floor() as u32,
        base_size,
        base_distance,
    }
}

fn twinkles<R: Rng>(
    rng: &mut R,
    count: u32,
    base_distance: f32,
    (near, reach): (f32, f32),
    max_delay_s: f32,
    (min_dur, dur_span): (f32, f32),
) -> impl Iterator<Item = Spark> + '_ {
    (0..count).map(move |_| Spark {
        kind: ParticleKind::Twinkle,
        params: VisualParams {
            angle_deg: span(rng, 0.0, 360.0),
            distance: base_distance * near + rng.gen::<f32>() * base_distance * reach,
            size: span(rng, 2.0, 3.0),
            delay_s: span(rng, 0.0, max_delay_s),
            duration_s: span(rng, min_dur, dur_span),
            color: TWINKLE_COLOR,
            glow: true,
            ..Default::default()
        },
    })
}

/// Sky burst at a random point in the upper half of the viewport.
pub fn firework<R: Rng>(rng: &mut R, perf: &PerfSettings, viewport: Vec2) -> ParticleSpec {
    let pos = Vec2::new(
        rng.gen::<f32>() * viewport.x,
        rng.gen::<f32>() * viewport.y * 0.5,
    );
    let profile = roll_profile(rng, &TOP_CLASSES, perf.firework_spark_scale);
    let willow = rng.gen::<f32>() < 0.3;
    let main = pick(rng, &FIREWORK_COLORS);
    let second = pick(rng, &FIREWORK_COLORS);

    let n = profile.sparks;
    let mut sparks = Vec::with_capacity(n as usize);
    for i in 0..n {
        let angle_deg = (i as f32 / n as f32) * 360.0 + span(rng, -7.5, 15.0);
        let color = if rng.gen::<f32>() > 0.6 { main } else { second };
        let distance = profile.base_distance + rng.gen::<f32>() * profile.base_distance;
        let size = profile.base_size + rng.gen::<f32>() * profile.base_size * 0.8;
        let duration_s = if willow {
            span(rng, 1.5, 1.0)
        } else {
            span(rng, 1.0, 0.8)
        };
        sparks.push(Spark {
            kind: ParticleKind::Spark,
            params: VisualParams {
                angle_deg,
                color,
                distance,
                size,
                duration_s,
                willow,
                glow: true,
                ..Default::default()
            },
        });
    }
    let twinkle_count = (n as f32 * perf.top_twinkle_ratio).floor() as u32;
    sparks.extend(twinkles(
        rng,
        twinkle_count,
        profile.base_distance,
        (0.3, 1.2),
        0.5,
        (0.8, 1.0),
    ));

    ParticleSpec {
        kind: ParticleKind::Firework,
        layer: Layer::Fireworks,
        ttl_ms: Some(FIREWORK_TTL_MS),
        params: VisualParams {
            pos,
            willow,
            ..Default::default()
        },
        sparks,
        on_expire: None,
    }
}

/// Rocket launched from the bottom edge. Its lifetime is the climb time; it
/// hands over to an explosion at the apex when it expires.
pub fn rocket<R: Rng>(rng: &mut R, viewport: Vec2) -> ParticleSpec {
    let start_x = rng.gen::<f32>() * viewport.x;
    let end_y = viewport.y * span(rng, 0.3, 0.3);
    let speed = span(rng, ROCKET_SPEED_MIN_PX, ROCKET_SPEED_SPAN_PX);
    let steps = ((viewport.y - end_y) / speed).ceil().max(1.0);
    let travel = steps * speed;
    let ttl_ms = (steps as f64 * ROCKET_STEP_MS).round() as u64;
    ParticleSpec {
        kind: ParticleKind::Rocket,
        layer: Layer::Fireworks,
        ttl_ms: Some(ttl_ms),
        params: VisualParams {
            pos: Vec2::new(start_x, 0.0),
            distance: travel,
            duration_s: ttl_ms as f32 / 1000.0,
            glow: true,
            ..Default::default()
        },
        sparks: Vec::new(),
        on_expire: Some(FollowUp::Explode {
            at: Vec2::new(start_x, viewport.y - travel),
        }),
    }
}

pub fn explosion<R: Rng>(rng: &mut R, perf: &PerfSettings, at: Vec2) -> ParticleSpec {
    let profile = roll_profile(rng, &EXPLOSION_CLASSES, perf.firework_spark_scale);
    let willow = rng.gen::<f32>() < 0.35;
    let main = pick(rng, &FIREWORK_COLORS);
    let second = pick(rng, &FIREWORK_COLORS);

    let n = profile.sparks;
    let mut sparks = Vec::with_capacity(n as usize);
    for i in 0..n {
        let angle_deg = (i as f32 / n as f32) * 360.0 + span(rng, -10.0, 20.0);
        let distance = profile.base_distance + rng.gen::<f32>() * profile.base_distance * 0.6;
        let color = if rng.gen::<f32>() > 0.5 { main } else { second };
        let size = profile.base_size + rng.gen::<f32>() * profile.base_size * 0.8;
        let duration_s = if willow {
            span(rng, 1.2, 0.8)
        } else {
            span(rng, 0.8, 0.7)
        };
        sparks.push(Spark {
            kind: ParticleKind::Spark,
            params: VisualParams {
                angle_deg,
                distance,
                color,
                size,
                duration_s,
                willow,
                glow: true,
                ..Default::default()
            },
        });
    }
    let twinkle_count = (n as f32 * perf.bottom_twinkle_ratio).floor() as u32;
    sparks.extend(twinkles(
        rng,
        twinkle_count,
        profile.base_distance,
        (0.2, 1.3),
        0.4,
        (0.6, 0.8),
    ));

    ParticleSpec {
        kind: ParticleKind::Explosion,
        layer: Layer::Fireworks,
        ttl_ms: Some(EXPLOSION_TTL_MS),
        params: VisualParams {
            pos: at,
            willow,
            ..Default::default()
        },
        sparks,
        on_expire: None,
    }
}

/// Li-xi envelope drifting up from below the fold.
pub fn floating_lixi<R: Rng>(rng: &mut R, viewport: Vec2) -> ParticleSpec {
    let params = VisualParams {
        pos: Vec2::new(rng.gen::<f32>() * viewport.x, viewport.y + 50.0),
        size: span(rng, 40.0, 30.0),
        duration_s: span(rng, 8.0, 5.0),
        ..Default::default()
    };
    ParticleSpec::single(
        ParticleKind::FloatingIcon,
        Layer::Page,
        Some(LIXI_TTL_MS),
        params,
    )
}

pub fn cursor_flower<R: Rng>(rng: &mut R, at: Vec2) -> ParticleSpec {
    let glyph = pick(rng, &CURSOR_GLYPHS);
    let size = span(rng, 14.0, 12.0);
    let offset = Vec2::new(
        (rng.gen::<f32>() - 0.5) * 20.0,
        (rng.gen::<f32>() - 0.5) * 20.0,
    );
    let params = VisualParams {
        pos: at + offset,
        size,
        color: glyph.color,
        glyph: glyph.text,
        angle_deg: span(rng, 0.0, 360.0),
        opacity: 0.9,
        ..Default::default()
    };
    ParticleSpec::single(
        ParticleKind::CursorFlower,
        Layer::Page,
        Some(CURSOR_FLOWER_TTL_MS),
        params,
    )
}

/// Petal falling through the greeting modal. Very low-end devices drop half
/// of them.
pub fn modal_petal<R: Rng>(rng: &mut R, tier: DeviceTier) -> Option<ParticleSpec> {
    if tier == DeviceTier::VeryLow && rng.gen::<f32>() > 0.5 {
        return None;
    }
    let glyph = pick(rng, &PETAL_GLYPHS[..4]);
    let duration_s = if tier.is_low_end() {
        span(rng, 6.0, 4.0)
    } else {
        span(rng, 8.0, 6.0)
    };
    let params = VisualParams {
        pos: Vec2::new(span(rng, 0.0, 100.0), 0.0),
        size: span(rng, 20.0, 25.0),
        color: glyph.color,
        glyph: glyph.text,
        duration_s,
        opacity: 0.7,
        ..Default::default()
    };
    let ttl_ms = (duration_s * 1000.0).ceil() as u64;
    Some(ParticleSpec::single(
        ParticleKind::Petal,
        Layer::Modal,
        Some(ttl_ms),
        params,
    ))
}

/// Firework inside the greeting modal; skipped entirely on very low-end
/// devices and drawn without glow on low-end ones.
pub fn modal_firework<R: Rng>(rng: &mut R, tier: DeviceTier, viewport: Vec2) -> Option<ParticleSpec> {
    if tier == DeviceTier::VeryLow {
        return None;
    }
    let low = tier.is_low_end();
    let pos = Vec2::new(
        rng.gen::<f32>() * viewport.x,
        rng.gen::<f32>() * viewport.y * 0.5,
    );
    let n = if low {
        15 + rng.gen_range(0..10)
    } else {
        30 + rng.gen_range(0..20)
    };
    let base_size = if low { 5.0 } else { 6.0 };
    let base_distance = if low { 60.0 } else { 80.0 };
    let main = pick(rng, &FIREWORK_COLORS);
    let second = pick(rng, &FIREWORK_COLORS);

    let sparks = (0..n)
        .map(|i| Spark {
            kind: ParticleKind::Spark,
            params: VisualParams {
                angle_deg: (i as f32 / n as f32) * 360.0 + span(rng, -7.5, 15.0),
                color: if rng.gen::<f32>() > 0.5 { main } else { second },
                distance: base_distance + rng.gen::<f32>() * base_distance,
                size: base_size + rng.gen::<f32>() * 3.0,
                duration_s: span(rng, 1.0, 0.8),
                glow: !low,
                ..Default::default()
            },
        })
        .collect();

    Some(ParticleSpec {
        kind: ParticleKind::Firework,
        layer: Layer::Modal,
        ttl_ms: Some(MODAL_FIREWORK_TTL_MS),
        params: VisualParams {
            pos,
            ..Default::default()
        },
        sparks,
        on_expire: None,
    })
}
