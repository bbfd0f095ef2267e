use feedback_core::{
    AudioEmitter, CooldownGate, CooldownParams, Cue, FeedbackConfig, FeedbackContext, GateDecision,
    HandTarget,
};

use super::play_sfx;
use crate::constants::DRUM_PULSE_DURATION_SEC;
use crate::events::Interactor;

/// One pad: its voice and an optional dedicated emitter.
pub struct DrumPad {
    pub config: FeedbackConfig,
    pub emitter: Option<Box<dyn AudioEmitter>>,
}

impl DrumPad {
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config: config.validated(),
            emitter: None,
        }
    }

    pub fn with_emitter(mut self, emitter: Box<dyn AudioEmitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }
}

/// Result of a pad trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PadHit {
    Played { pad: usize, hand: HandTarget },
    /// Rays and other far-field interactors don't strike pads.
    WrongInteractor,
    UnknownPad(usize),
    Gated(GateDecision),
}

/// A bank of pads sharing one speed-adaptive debounce.
pub struct DrumPadStation {
    pads: Vec<DrumPad>,
    station_emitter: Box<dyn AudioEmitter>,
    gate: CooldownGate<usize>,
}

impl DrumPadStation {
    pub fn new(pads: Vec<DrumPad>, station_emitter: Box<dyn AudioEmitter>, params: CooldownParams) -> Self {
        for (i, pad) in pads.iter().enumerate() {
            if pad.config.advanced_clip.is_none() {
                log::warn!("[drum] pad {i}: missing advanced clip");
            }
        }
        log::info!("[drum] {} pads", pads.len());
        Self {
            pads,
            station_emitter,
            gate: CooldownGate::new(params),
        }
    }

    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }

    pub fn gate(&self) -> &CooldownGate<usize> {
        &self.gate
    }

    /// Hover or select on pad `index` by `interactor`.
    pub fn hit(&mut self, ctx: &mut FeedbackContext, index: usize, interactor: &Interactor) -> PadHit {
        if !interactor.kind.is_touch() {
            log::debug!("[drum] ignored interactor {:?}", interactor.kind);
            return PadHit::WrongInteractor;
        }
        if index >= self.pads.len() {
            log::warn!("[drum] no pad at index {index}");
            return PadHit::UnknownPad(index);
        }

        let decision = self.gate.try_trigger(index, interactor.speed, ctx.now());
        match decision {
            GateDecision::Accepted => {}
            GateDecision::Micromovement { speed } => {
                log::debug!("[drum] ignored micromovement on pad {index} (speed={speed:.3})");
                return PadHit::Gated(decision);
            }
            GateDecision::Debounced {
                elapsed_sec,
                cooldown_sec,
            } => {
                log::debug!(
                    "[drum] debounced pad {index}: elapsed={elapsed_sec:.3}s < cooldown={cooldown_sec:.3}s"
                );
                return PadHit::Gated(decision);
            }
        }

        let hand = interactor.hand(HandTarget::Right);
        let pad = &mut self.pads[index];
        let emitter = match pad.emitter.as_mut() {
            Some(e) => &mut **e,
            None => &mut *self.station_emitter,
        };
        if let Err(e) = play_sfx("drum", emitter, &pad.config, 1.0) {
            log::warn!("[drum] pad {index}: {e}");
        }
        let cue = Cue::new(&pad.config, hand).duration(DRUM_PULSE_DURATION_SEC);
        ctx.play_logged("drum", &cue);
        log::debug!("[drum] pad {index} hit by {hand:?}");
        PadHit::Played { pad: index, hand }
    }
}
