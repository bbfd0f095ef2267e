use fnv::FnvHashSet;

use feedback_core::SurfaceMask;

use super::Collider;

/// Which colliders count as touching the scraping surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactFilter {
    pub surfaces: SurfaceMask,
    pub ignore_triggers: bool,
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self {
            surfaces: SurfaceMask::ALL,
            ignore_triggers: true,
        }
    }
}

impl ContactFilter {
    pub fn accepts(&self, c: &Collider) -> bool {
        !(self.ignore_triggers && c.is_trigger) && self.surfaces.contains(c.category)
    }
}

/// Edge produced by a contact enter or exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactChange {
    /// First overlapping collider arrived.
    Began,
    /// Last overlapping collider left.
    Ended,
    Unchanged,
}

/// Set of colliders currently overlapping a held object.
#[derive(Clone, Debug, Default)]
pub struct ContactTracker {
    filter: ContactFilter,
    contacts: FnvHashSet<u32>,
    pub debug: bool,
}

impl ContactTracker {
    pub fn new(filter: ContactFilter) -> Self {
        Self {
            filter,
            contacts: FnvHashSet::default(),
            debug: false,
        }
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    pub fn is_touching(&self) -> bool {
        !self.contacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Enters only count while the object is held.
    pub fn enter(&mut self, held: bool, c: &Collider) -> ContactChange {
        if !held || !self.filter.accepts(c) {
            return ContactChange::Unchanged;
        }
        let was_empty = self.contacts.is_empty();
        if !self.contacts.insert(c.id) {
            return ContactChange::Unchanged;
        }
        if self.debug {
            log::debug!(
                "[contact] enter id={} category={} trigger={}",
                c.id,
                c.category,
                c.is_trigger
            );
        }
        if was_empty {
            ContactChange::Began
        } else {
            ContactChange::Unchanged
        }
    }

    pub fn exit(&mut self, c: &Collider) -> ContactChange {
        if !self.filter.accepts(c) {
            return ContactChange::Unchanged;
        }
        if self.contacts.remove(&c.id) && self.contacts.is_empty() {
            if self.debug {
                log::debug!("[contact] exit id={} category={}", c.id, c.category);
            }
            ContactChange::Ended
        } else {
            ContactChange::Unchanged
        }
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}
