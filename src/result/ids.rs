use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::warn;

/// Shared issue-id counter of one result container.
///
/// Every bundle, checker and issue attached to a container holds a clone of
/// the container's handle, so an id can be drawn anywhere in the tree
/// without a pointer back to the root. The counter only moves forward, and
/// every id it has handed out or seen is remembered so that an id read from
/// a file can be checked before it is kept.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    state: Rc<RefCell<IdState>>,
}

#[derive(Debug, Default)]
struct IdState {
    next: u64,
    used: HashSet<u64>,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next free id.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.next;
        match id.checked_add(1) {
            Some(next) => state.next = next,
            None => warn!("Issue id counter exhausted at {id}"),
        }
        state.used.insert(id);
        id
    }

    /// Marks `id` as taken so it is never handed out later.
    ///
    /// `u64::MAX` cannot be reserved: the counter would have nowhere left to
    /// move.
    pub fn reserve(&self, id: u64) {
        let Some(after) = id.checked_add(1) else {
            warn!("Issue id {id} is out of range and is not reserved");
            return;
        };
        let mut state = self.state.borrow_mut();
        state.used.insert(id);
        if after > state.next {
            state.next = after;
        }
    }

    /// Reserves `id` if nothing in the container uses it yet. Returns
    /// `false` when the id is taken or cannot be reserved.
    #[must_use]
    pub fn claim(&self, id: u64) -> bool {
        if id == u64::MAX || self.is_used(id) {
            return false;
        }
        self.reserve(id);
        true
    }

    #[must_use]
    pub fn is_used(&self, id: u64) -> bool {
        self.state.borrow().used.contains(&id)
    }

    /// The id the next call to [`Self::next_id`] would return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.state.borrow().next
    }

    #[must_use]
    pub fn is_shared_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
