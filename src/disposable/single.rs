//! Exactly-once assignment slot.

use std::mem;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::sync::lock;
use super::{BoxDisposable, Disposable};


enum Slot {
    Unset,
    Set(BoxDisposable),
    Disposed,
}

/// Outcome of a successful [`SingleAssignmentDisposable::assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The slot now owns the handle.
    Stored,
    /// The slot had already been disposed, so the handle was disposed on
    /// arrival.
    AlreadyDisposed,
}

/// A slot that accepts exactly one cancellation handle.
///
/// The slot moves from *unset* to *assigned* to *disposed*. Disposing it
/// releases the stored handle exactly once. A handle assigned after disposal
/// is released immediately, which covers a source that terminates before the
/// code subscribing to it has stored its handle.
///
/// Every state change is a single exchange of the slot's contents under a
/// mutex. No foreign code runs while the lock is held, and the lock is never
/// taken twice by one transition, so each transition behaves as an atomic
/// exchange: a racing `dispose` and `assign` observe each other's effect in
/// one order or the other, never partially. The displaced handle is
/// disposed after the lock is released, so nested dispose chains cannot
/// deadlock.
pub struct SingleAssignmentDisposable {
    slot: Mutex<Slot>,
}

impl Default for SingleAssignmentDisposable {
    fn default() -> SingleAssignmentDisposable {
        SingleAssignmentDisposable { slot: Mutex::new(Slot::Unset) }
    }
}

impl SingleAssignmentDisposable {
    /// Create an unset slot.
    pub fn new() -> SingleAssignmentDisposable {
        SingleAssignmentDisposable::default()
    }

    /// Store `handle` in the slot.
    ///
    /// Assigning to a slot that already holds a handle is a bug in the
    /// calling code and fails with [`Error::InvalidState`]. The rejected
    /// handle is dropped without being disposed.
    pub fn assign(&self, handle: BoxDisposable) -> Result<Assignment> {
        let mut slot = lock(&self.slot);
        if matches!(*slot, Slot::Set(_)) {
            return Err(Error::InvalidState("disposable is already assigned"));
        }
        if matches!(*slot, Slot::Unset) {
            *slot = Slot::Set(handle);
            return Ok(Assignment::Stored);
        }
        drop(slot);
        tracing::trace!("handle assigned after disposal, disposing it");
        handle.dispose();
        Ok(Assignment::AlreadyDisposed)
    }

    /// Whether a handle was stored and the slot has not been disposed yet.
    pub fn is_assigned(&self) -> bool {
        matches!(*lock(&self.slot), Slot::Set(_))
    }
}

impl Disposable for SingleAssignmentDisposable {
    fn dispose(&self) {
        let previous = mem::replace(&mut *lock(&self.slot), Slot::Disposed);
        if let Slot::Set(handle) = previous {
            handle.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        matches!(*lock(&self.slot), Slot::Disposed)
    }
}
