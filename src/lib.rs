//! Interactive contact-feedback stations.
//!
//! Each station (hammer, drum pads, friction stone, drill, projectile
//! launcher, world-space UI) turns host interaction events into audio and
//! haptic cues using the synthesis engine in [`feedback_core`]. The host
//! supplies physics, input and rendering backends; stations are advanced
//! from its frame loop.

pub mod constants;
pub mod events;
pub mod stations;

pub use stations::*;
