use feedback_core::{AudioEmitter, Cue, FeedbackConfig, FeedbackContext, HandTarget};

use super::play_sfx;
use crate::events::Interactor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Hover,
    Click,
}

/// Hover and click feedback for world-space UI.
pub struct UiHapticsStation {
    hover: FeedbackConfig,
    click: FeedbackConfig,
    emitter: Box<dyn AudioEmitter>,
}

impl UiHapticsStation {
    pub fn new(hover: FeedbackConfig, click: FeedbackConfig, emitter: Box<dyn AudioEmitter>) -> Self {
        Self {
            hover: hover.validated(),
            click: click.validated(),
            emitter,
        }
    }

    pub fn play_hover(&mut self, ctx: &mut FeedbackContext, hand: HandTarget) {
        self.play(ctx, UiEvent::Hover, hand);
    }

    pub fn play_click(&mut self, ctx: &mut FeedbackContext, hand: HandTarget) {
        self.play(ctx, UiEvent::Click, hand);
    }

    fn play(&mut self, ctx: &mut FeedbackContext, event: UiEvent, hand: HandTarget) {
        let config = match event {
            UiEvent::Hover => &self.hover,
            UiEvent::Click => &self.click,
        };
        if config.sfx.is_some() {
            if let Err(e) = play_sfx("ui", &mut *self.emitter, config, 1.0) {
                log::warn!("[ui] {e}");
            }
        }
        ctx.play_logged("ui", &Cue::new(config, hand));
    }
}

/// Routes pointer events from UI elements to a [`UiHapticsStation`].
pub struct UiForwarder;

impl UiForwarder {
    /// `Both` means the source hand could not be determined.
    pub fn resolve_hand(source: Option<&Interactor>) -> HandTarget {
        match source {
            Some(interactor) => interactor.hand(HandTarget::Right),
            None => {
                log::warn!("[ui] could not determine which hand triggered the UI event");
                HandTarget::Both
            }
        }
    }

    /// Forward `event`; unresolved hands play nothing.
    pub fn forward(
        station: &mut UiHapticsStation,
        ctx: &mut FeedbackContext,
        event: UiEvent,
        source: Option<&Interactor>,
    ) -> Option<HandTarget> {
        let hand = Self::resolve_hand(source);
        if hand == HandTarget::Both {
            return None;
        }
        match event {
            UiEvent::Hover => station.play_hover(ctx, hand),
            UiEvent::Click => station.play_click(ctx, hand),
        }
        Some(hand)
    }
}
