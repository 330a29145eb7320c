//! Simulation module
//!
//! Entity lifecycle and motion engine shared by every sketch:
//! - One struct per motion model, advanced by a pure transition
//! - Populations own entity lifetime (spawn policy, eviction)
//! - Single-threaded per instance; no rendering backend dependencies

pub mod bloom;
pub mod fall;
pub mod jitter;
pub mod lifecycle;
pub mod link;
pub mod motion;
pub mod rng;
pub mod ripple;
pub mod seek;
pub mod tick;

pub use bloom::{Bloom, BloomParams, ShapeKind};
pub use fall::{FallParams, Faller};
pub use jitter::{Franticness, Jitter, JitterParams};
pub use lifecycle::{Eviction, Population, SpawnPolicy, SpawnTrigger};
pub use link::{Link, LinkStyle, draw_links, find_links};
pub use motion::{Motion, TickContext};
pub use rng::SketchRng;
pub use ripple::{Ripple, RippleParams};
pub use seek::{SeekParams, Seeker, TrailStyle};
pub use tick::{Backdrop, EntityView, Simulation, Sketch, TickReport};
