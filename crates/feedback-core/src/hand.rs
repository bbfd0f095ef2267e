use smallvec::SmallVec;

/// A single physical controller with its own actuator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

/// Which controller(s) a cue is routed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HandTarget {
    Left,
    #[default]
    Right,
    Both,
}

impl HandTarget {
    /// Concrete hands covered by this target, left first.
    pub fn hands(self) -> SmallVec<[Hand; 2]> {
        match self {
            HandTarget::Left => smallvec::smallvec![Hand::Left],
            HandTarget::Right => smallvec::smallvec![Hand::Right],
            HandTarget::Both => smallvec::smallvec![Hand::Left, Hand::Right],
        }
    }

    pub fn includes(self, hand: Hand) -> bool {
        matches!(
            (self, hand),
            (HandTarget::Both, _) | (HandTarget::Left, Hand::Left) | (HandTarget::Right, Hand::Right)
        )
    }
}

impl From<Hand> for HandTarget {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Left => HandTarget::Left,
            Hand::Right => HandTarget::Right,
        }
    }
}

/// Tracked-device node reported by an XR controller, when the host knows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerNode {
    LeftHand,
    RightHand,
    Other,
}

/// Work out which hand an interactor belongs to.
///
/// An explicit controller node wins. Otherwise the interactor's name
/// ancestry (self first, then parents) is searched case-insensitively for
/// "left" or "right"; the first hit decides. Falls back to `fallback`.
pub fn resolve_hand<S: AsRef<str>>(
    node: Option<ControllerNode>,
    ancestry: &[S],
    fallback: HandTarget,
) -> HandTarget {
    match node {
        Some(ControllerNode::LeftHand) => return HandTarget::Left,
        Some(ControllerNode::RightHand) => return HandTarget::Right,
        _ => {}
    }
    for name in ancestry {
        let n = name.as_ref().to_lowercase();
        if n.contains("left") {
            return HandTarget::Left;
        }
        if n.contains("right") {
            return HandTarget::Right;
        }
    }
    fallback
}
