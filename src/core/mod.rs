pub mod api;
pub mod config;
pub mod countdown;
pub mod greeting;
pub mod page;
pub mod particle;
pub mod scheduler;
pub mod session;
pub mod tier;
pub mod trail;
pub mod wishes;

pub use config::{FestiveConfig, Season};
pub use countdown::{Countdown, CountdownDisplay};
pub use page::{effects_allowed, AmbientRates, PageKind};
pub use particle::{EffectParticle, Layer, ParticleId, ParticleKind};
pub use scheduler::{Cue, EffectScheduler, EffectSurface, FrameInput, TickReport};
pub use session::{SessionEffectsState, SessionFlag, SessionStore};
pub use tier::{DeviceSignals, DeviceTier, PerfSettings};
pub use trail::CursorTrail;
