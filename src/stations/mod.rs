//! Interactive stations. Each one owns its voices and reacts to host events,
//! rendering through the shared [`FeedbackContext`](feedback_core::FeedbackContext).

pub mod drill;
pub mod drum_pad;
pub mod friction;
pub mod hammer;
pub mod space_gun;
pub mod ui;

pub use drill::DrillStation;
pub use drum_pad::{DrumPad, DrumPadStation, PadHit};
pub use friction::{FrictionParams, FrictionStation};
pub use hammer::{HammerParams, HammerStation};
pub use space_gun::{Muzzle, ProjectileSpawner, SpaceGunStation};
pub use ui::{UiEvent, UiForwarder, UiHapticsStation};

use feedback_core::{AudioEmitter, FeedbackConfig, FeedbackError, HandTarget};

/// Which hand, if any, currently holds a grabbable station.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grip {
    hand: Option<HandTarget>,
}

impl Grip {
    pub fn grab(&mut self, hand: HandTarget) {
        self.hand = Some(hand);
    }

    pub fn release(&mut self) -> Option<HandTarget> {
        self.hand.take()
    }

    pub fn is_held(&self) -> bool {
        self.hand.is_some()
    }

    pub fn hand(&self) -> Option<HandTarget> {
        self.hand
    }
}

/// Fire the voice's audio one-shot at `sfx_volume * gain`.
pub(crate) fn play_sfx(
    tag: &str,
    emitter: &mut dyn AudioEmitter,
    config: &FeedbackConfig,
    gain: f32,
) -> Result<(), FeedbackError> {
    let clip = config
        .sfx
        .as_ref()
        .ok_or(FeedbackError::MissingConfiguration("sfx clip"))?;
    let volume = config.sfx_volume * gain;
    emitter.play_one_shot(clip, volume);
    log::debug!("[{tag}] sfx '{}' vol={volume:.2}", clip.name);
    Ok(())
}
