//! Inline execution.

use crate::disposable::{self, BoxDisposable};
use super::{Action, Scheduler};


/// Runs every action inline, on the calling thread, before `schedule`
/// returns.
///
/// Work that reschedules itself recurses on the native stack, so this
/// scheduler suits short, bounded work only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn is_schedule_required(&self) -> bool { false }

    fn schedule(&self, action: Action) -> BoxDisposable {
        action();
        disposable::empty()
    }
}
