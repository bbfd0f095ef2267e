//! Procedural contact-feedback synthesis.
//!
//! Turns contact signals (sliding speed, impact speed) into audio and haptic
//! output: a crossfaded bed loop, a distance-driven grain stream, periodic
//! pulses, and gated one-shots. Everything advances from explicit `tick`
//! calls on one thread; rendering happens behind the traits in [`backend`].

pub mod backend;
pub mod bed;
pub mod config;
pub mod constants;
pub mod cooldown;
pub mod dispatch;
pub mod error;
pub mod grain;
pub mod hand;
pub mod impact;
pub mod intensity;
pub mod math;
pub mod mode;
pub mod recording;
pub mod session;

pub use backend::*;
pub use bed::*;
pub use config::*;
pub use cooldown::*;
pub use dispatch::*;
pub use error::FeedbackError;
pub use grain::*;
pub use hand::*;
pub use impact::*;
pub use intensity::*;
pub use mode::*;
pub use session::*;
