use feedback_core::{
    AudioEmitter, Cue, FeedbackConfig, FeedbackContext, HandTarget, ImpactMapper, ImpactOutcome,
    ImpactParams,
};

use super::{play_sfx, Grip};

#[derive(Clone, Debug, PartialEq)]
pub struct HammerParams {
    pub impact: ImpactParams,
    /// Clip playback uses the impact amplitude instead of the configured one.
    pub overrides_amplitude: bool,
}

impl Default for HammerParams {
    fn default() -> Self {
        Self {
            impact: ImpactParams::default(),
            overrides_amplitude: true,
        }
    }
}

/// Grabbable hammer: strikes are scaled by impact speed.
pub struct HammerStation {
    config: FeedbackConfig,
    emitter: Box<dyn AudioEmitter>,
    mapper: ImpactMapper,
    overrides_amplitude: bool,
    grip: Grip,
}

impl HammerStation {
    pub fn new(config: FeedbackConfig, emitter: Box<dyn AudioEmitter>, params: HammerParams) -> Self {
        if config.advanced_clip.is_none() {
            log::warn!("[hammer] no advanced haptic clip configured for impact");
        }
        Self {
            config: config.validated(),
            emitter,
            mapper: ImpactMapper::new(params.impact),
            overrides_amplitude: params.overrides_amplitude,
            grip: Grip::default(),
        }
    }

    pub fn grab(&mut self, hand: HandTarget) {
        self.grip.grab(hand);
        log::info!("[hammer] grabbed with {hand:?} hand");
    }

    pub fn release(&mut self) {
        if self.grip.release().is_some() {
            log::info!("[hammer] released");
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.grip.is_held()
    }

    /// A strike at `speed` m/s against a surface of `category`.
    ///
    /// Returns the amplitude that was played, if any.
    pub fn handle_impact(&mut self, ctx: &mut FeedbackContext, speed: f32, category: u8) -> Option<f32> {
        let Some(hand) = self.grip.hand() else {
            log::debug!("[hammer] ignored impact at {speed:.3} m/s: not grabbed");
            return None;
        };
        let amplitude = match self.mapper.map(speed, category) {
            ImpactOutcome::Accepted(a) => a,
            ImpactOutcome::BelowThreshold(a) => {
                log::debug!("[hammer] ignored: amplitude too low ({a:.3})");
                return None;
            }
            ImpactOutcome::FilteredSurface => {
                log::debug!("[hammer] ignored: surface {category} not in mask");
                return None;
            }
        };

        if let Err(e) = play_sfx("hammer", &mut *self.emitter, &self.config, amplitude) {
            log::warn!("[hammer] {e}, no sound played");
        }
        let mut cue = Cue::new(&self.config, hand).amplitude(amplitude);
        if self.overrides_amplitude {
            cue = cue.clip_amplitude(amplitude);
        }
        if let Some(routed) = ctx.play_logged("hammer", &cue) {
            log::debug!("[hammer] speed={speed:.3} -> {routed:?}");
        }
        Some(amplitude)
    }
}
