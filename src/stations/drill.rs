use feedback_core::{AudioEmitter, Cue, FeedbackConfig, FeedbackContext, HandTarget, HapticMode};

use crate::constants::DRILL_HAPTIC_INTERVAL_SEC;

/// Trigger-held power drill.
///
/// The motor sound runs on the emitter's voice; in Basic mode the activating
/// hand is re-pulsed on a fixed interval for as long as the motor plays.
pub struct DrillStation {
    config: FeedbackConfig,
    motor: Box<dyn AudioEmitter>,
    drilling: bool,
    hand: HandTarget,
    haptic_timer: f32,
}

impl DrillStation {
    pub fn new(config: FeedbackConfig, motor: Box<dyn AudioEmitter>) -> Self {
        Self {
            config: config.validated(),
            motor,
            drilling: false,
            hand: HandTarget::Right,
            haptic_timer: 0.0,
        }
    }

    pub fn is_drilling(&self) -> bool {
        self.drilling
    }

    pub fn activate(&mut self, ctx: &mut FeedbackContext, hand: HandTarget) {
        match self.config.sfx.as_ref() {
            Some(clip) => {
                self.motor.set_volume(self.config.sfx_volume);
                self.motor.set_pitch(1.0);
                self.motor.play(clip, 0.0);
            }
            None => log::warn!("[drill] missing motor audio clip"),
        }
        self.drilling = true;
        self.hand = hand;
        self.haptic_timer = 0.0;
        log::info!("[drill] on ({hand:?})");
        ctx.play_logged("drill", &Cue::new(&self.config, hand));
    }

    pub fn deactivate(&mut self, ctx: &mut FeedbackContext, hand: HandTarget) {
        if self.motor.is_playing() {
            self.motor.stop();
        }
        self.drilling = false;
        log::info!("[drill] off ({hand:?})");
        match ctx.mode() {
            HapticMode::Advanced => ctx.dispatcher.stop_clip(&self.config),
            HapticMode::Basic => ctx.dispatcher.stop_pulses(hand),
        }
    }

    /// Dropped: silence everything on both backends and both hands.
    pub fn ungrab(&mut self, ctx: &mut FeedbackContext) {
        if self.motor.is_playing() {
            self.motor.stop();
        }
        self.drilling = false;
        ctx.dispatcher.stop_all(HandTarget::Both, &self.config);
    }

    pub fn tick(&mut self, ctx: &mut FeedbackContext, dt_sec: f32) {
        if !self.drilling || ctx.mode() == HapticMode::Advanced {
            return;
        }
        if !self.motor.is_playing() {
            log::debug!("[drill] motor ran out");
            self.drilling = false;
            return;
        }
        self.haptic_timer -= dt_sec;
        if self.haptic_timer <= 0.0 {
            self.haptic_timer = DRILL_HAPTIC_INTERVAL_SEC;
            ctx.play_logged("drill", &Cue::new(&self.config, self.hand));
        }
    }
}
