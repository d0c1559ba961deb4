//! Two-slot cancellation handle.

use super::{Disposable, SingleAssignmentDisposable};


/// Two independent single-assignment slots released together.
///
/// Either slot may be filled before or after the pair is disposed; a handle
/// that arrives late is released on arrival. This supports two-phase
/// construction where the second handle does not exist yet when the first is
/// stored, such as the two branches of a race.
///
/// `is_disposed` reports whether the pair was disposed. A slot that was never
/// filled does not hold that back.
#[derive(Default)]
pub struct BinaryDisposable {
    first: SingleAssignmentDisposable,
    second: SingleAssignmentDisposable,
}

impl BinaryDisposable {
    /// Create a pair of unset slots.
    pub fn new() -> BinaryDisposable {
        BinaryDisposable::default()
    }

    /// The first slot.
    pub fn first(&self) -> &SingleAssignmentDisposable {
        &self.first
    }

    /// The second slot.
    pub fn second(&self) -> &SingleAssignmentDisposable {
        &self.second
    }
}

impl Disposable for BinaryDisposable {
    fn dispose(&self) {
        self.first.dispose();
        self.second.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.first.is_disposed() && self.second.is_disposed()
    }
}
