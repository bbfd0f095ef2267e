//! Friction stone: a held object scraped across surfaces.
//!
//! Contact enters and exits drive the session's contact flag; per-frame
//! positions drive the bed, grains and pulses.

use glam::Vec3;

use feedback_core::{
    ContactSession, FeedbackConfig, FeedbackContext, HandTarget, SessionParams, SessionTick,
    SessionVoices,
};

use crate::events::contact::{ContactChange, ContactFilter, ContactTracker};
use crate::events::{Collider, Interactor};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrictionParams {
    pub session: SessionParams,
    pub contact: ContactFilter,
    /// Log every contact enter and exit.
    pub debug_contacts: bool,
}

pub struct FrictionStation {
    session: ContactSession,
    contacts: ContactTracker,
}

impl FrictionStation {
    pub fn new(params: FrictionParams, config: FeedbackConfig, voices: SessionVoices, seed: u64) -> Self {
        let mut contacts = ContactTracker::new(params.contact);
        contacts.debug = params.debug_contacts;
        Self {
            session: ContactSession::new(params.session, config, voices, seed),
            contacts,
        }
    }

    pub fn session(&self) -> &ContactSession {
        &self.session
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn grab(&mut self, interactor: &Interactor, position: Vec3) -> HandTarget {
        let hand = interactor.hand(HandTarget::Right);
        self.session.begin(hand, position);
        hand
    }

    pub fn release(&mut self, ctx: &mut FeedbackContext) {
        self.contacts.clear();
        self.session.end(ctx);
    }

    pub fn contact_enter(&mut self, ctx: &mut FeedbackContext, collider: &Collider) {
        if self.contacts.enter(self.session.is_held(), collider) == ContactChange::Began {
            self.session.set_contact(ctx, true);
        }
    }

    pub fn contact_exit(&mut self, ctx: &mut FeedbackContext, collider: &Collider) {
        if self.contacts.exit(collider) == ContactChange::Ended {
            self.session.set_contact(ctx, false);
        }
    }

    pub fn tick(&mut self, ctx: &mut FeedbackContext, dt_sec: f32, position: Vec3) -> SessionTick {
        self.session.tick(ctx, dt_sec, position)
    }
}
