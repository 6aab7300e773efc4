// Device capability classification and the effect budget derived from it.
//
// Pure functions only: the wasm front-end gathers `DeviceSignals` from the
// navigator once at startup and never reclassifies.

use crate::constants::{
    LOW_MAX_CONCURRENCY, MODAL_SMALL_VIEWPORT_PX, SMALL_VIEWPORT_PX, VERY_LOW_MAX_CONCURRENCY, WELCOME_INTERVAL_HIGH_MS,
    WELCOME_INTERVAL_LOW_MS,
};

const MOBILE_UA_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Raw environment readings used for tier classification.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceSignals {
    /// `navigator.hardwareConcurrency`; 0 when the browser does not report it.
    pub hardware_concurrency: u32,
    pub user_agent: String,
    pub viewport_width: f64,
    pub prefers_reduced_motion: bool,
}

impl DeviceSignals {
    #[inline]
    pub fn is_mobile(&self) -> bool {
        is_mobile_user_agent(&self.user_agent)
    }

    // Unknown concurrency never counts as low-end.
    #[inline]
    fn cores_at_most(&self, limit: u32) -> bool {
        self.hardware_concurrency != 0 && self.hardware_concurrency <= limit
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceTier {
    VeryLow,
    Low,
    High,
}

impl DeviceTier {
    pub fn classify(signals: &DeviceSignals) -> Self {
        if signals.prefers_reduced_motion {
            return DeviceTier::VeryLow;
        }
        Self::from_hardware(signals, SMALL_VIEWPORT_PX)
    }

    /// Tier for the greeting modal's petals and fireworks. Same table with a
    /// wider small-viewport threshold; reduced motion is not consulted.
    pub fn classify_modal(signals: &DeviceSignals) -> Self {
        Self::from_hardware(signals, MODAL_SMALL_VIEWPORT_PX)
    }

    fn from_hardware(signals: &DeviceSignals, small_viewport_px: f64) -> Self {
        let mobile = signals.is_mobile();
        if signals.cores_at_most(VERY_LOW_MAX_CONCURRENCY)
            || (mobile && signals.viewport_width < small_viewport_px)
        {
            DeviceTier::VeryLow
        } else if signals.cores_at_most(LOW_MAX_CONCURRENCY) || mobile {
            DeviceTier::Low
        } else {
            DeviceTier::High
        }
    }

    #[inline]
    pub fn is_low_end(self) -> bool {
        self != DeviceTier::High
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceTier::VeryLow => "Very Low",
            DeviceTier::Low => "Low",
            DeviceTier::High => "High",
        }
    }
}

/// Effect budget for one page session. Read-only after startup.
#[derive(Clone, Debug, PartialEq)]
pub struct PerfSettings {
    pub tier: DeviceTier,
    pub petal_count: u32,
    pub firework_enabled: bool,
    pub firework_interval_ms: u64,
    pub bottom_firework_enabled: bool,
    pub cursor_trail_enabled: bool,
    pub max_cursor_flowers: usize,
    pub lixi_enabled: bool,
    pub lixi_interval_ms: u64,
    /// Multiplier applied to the spark count of every burst.
    pub firework_spark_scale: f32,
    /// Twinkles per spark for top fireworks and rocket explosions.
    pub top_twinkle_ratio: f32,
    pub bottom_twinkle_ratio: f32,
    pub welcome_bursts: u32,
    pub welcome_interval_ms: u64,
}

impl PerfSettings {
    pub fn detect(signals: &DeviceSignals) -> Self {
        Self::for_tier(DeviceTier::classify(signals), signals.is_mobile())
    }

    pub fn for_tier(tier: DeviceTier, mobile: bool) -> Self {
        let low = tier.is_low_end();
        let very_low = tier == DeviceTier::VeryLow;
        Self {
            tier,
            petal_count: match tier {
                DeviceTier::VeryLow => 5,
                DeviceTier::Low => 10,
                DeviceTier::High => 20,
            },
            firework_enabled: !very_low,
            firework_interval_ms: if low { 8000 } else { 4000 },
            bottom_firework_enabled: !low,
            cursor_trail_enabled: !mobile && !very_low,
            max_cursor_flowers: if low { 8 } else { 15 },
            lixi_enabled: !very_low,
            lixi_interval_ms: if low { 10000 } else { 5000 },
            firework_spark_scale: if low { 0.5 } else { 1.0 },
            top_twinkle_ratio: if low { 0.2 } else { 0.6 },
            bottom_twinkle_ratio: if low { 0.2 } else { 0.5 },
            welcome_bursts: if low { 10 } else { 20 },
            welcome_interval_ms: if low {
                WELCOME_INTERVAL_LOW_MS
            } else {
                WELCOME_INTERVAL_HIGH_MS
            },
        }
    }
}
