use crate::constants::{CURSOR_MIN_TRAVEL_PX, CURSOR_THROTTLE_MS};
use glam::Vec2;

/// Pointer sampler for the cursor trail: at most one sample per throttle
/// window, and only when the pointer travelled far enough since the last
/// accepted sample.
#[derive(Clone, Debug, Default)]
pub struct CursorTrail {
    last_pos: Vec2,
    last_sample_ms: Option<f64>,
}

impl CursorTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_spawn(&mut self, pos: Vec2, now_ms: f64) -> bool {
        if let Some(last) = self.last_sample_ms {
            if now_ms - last < CURSOR_THROTTLE_MS {
                return false;
            }
        }
        self.last_sample_ms = Some(now_ms);
        let travelled = pos.distance(self.last_pos);
        self.last_pos = pos;
        travelled >= CURSOR_MIN_TRAVEL_PX
    }
}
