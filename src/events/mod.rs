//! Host event shapes and the adapters that turn them into station input.

pub mod contact;
pub mod impact;

use feedback_core::{resolve_hand, ControllerNode, HandTarget};

/// How an interactor reaches its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractorKind {
    /// Hand-held grab volume.
    #[default]
    Direct,
    /// Fingertip poke.
    Poke,
    /// Distance ray.
    Ray,
    Other,
}

impl InteractorKind {
    /// Near-field interactors that physically touch what they trigger.
    pub fn is_touch(self) -> bool {
        matches!(self, InteractorKind::Direct | InteractorKind::Poke)
    }
}

/// The thing that grabbed, poked or pointed at a station.
#[derive(Clone, Debug, Default)]
pub struct Interactor {
    pub kind: InteractorKind,
    pub node: Option<ControllerNode>,
    /// Object names from the interactor up through its parents.
    pub ancestry: Vec<String>,
    /// Speed of the interactor's rigid body, if it has one (m/s).
    pub speed: Option<f32>,
}

impl Interactor {
    pub fn new(kind: InteractorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn on(mut self, node: ControllerNode) -> Self {
        self.node = Some(node);
        self
    }

    pub fn named<I, S>(mut self, ancestry: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ancestry = ancestry.into_iter().map(Into::into).collect();
        self
    }

    pub fn moving(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn hand(&self, fallback: HandTarget) -> HandTarget {
        resolve_hand(self.node, &self.ancestry, fallback)
    }
}

/// A collider reported by the host physics layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Collider {
    pub id: u32,
    /// Surface category (layer index, 0..32).
    pub category: u8,
    pub is_trigger: bool,
}

impl Collider {
    pub fn solid(id: u32, category: u8) -> Self {
        Self {
            id,
            category,
            is_trigger: false,
        }
    }

    pub fn trigger(id: u32, category: u8) -> Self {
        Self {
            id,
            category,
            is_trigger: true,
        }
    }
}
