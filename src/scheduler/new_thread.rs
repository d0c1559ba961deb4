//! One thread per action.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crate::disposable::{BoxDisposable, BooleanDisposable, Disposable};
use super::{Action, LongRunning, LongRunningAction, Scheduler};


/// Runs every action on a freshly spawned thread.
///
/// This is the scheduler to hand to operators with long-running loops: it
/// offers the [`LongRunning`] capability.
#[derive(Debug, Default)]
pub struct NewThread {
    spawned: AtomicUsize,
}

impl NewThread {
    /// Create a scheduler.
    pub fn new() -> NewThread {
        NewThread::default()
    }

    fn spawn<F: FnOnce() + Send + 'static>(&self, work: F) {
        let id = self.spawned.fetch_add(1, Ordering::Relaxed);
        thread::Builder::new()
            .name(format!("reagent-worker-{}", id))
            .spawn(work)
            .map(drop)
            .unwrap_or_else(|error| tracing::error!(%error, "failed to spawn worker thread"));
    }
}

impl Scheduler for NewThread {
    fn schedule(&self, action: Action) -> BoxDisposable {
        let cancel = Arc::new(BooleanDisposable::new());
        {
            let cancel = cancel.clone();
            self.spawn(move || {
                if !cancel.is_disposed() {
                    action();
                }
            });
        }
        Box::new(cancel)
    }

    fn as_long_running(&self) -> Option<&dyn LongRunning> {
        Some(self)
    }
}

impl LongRunning for NewThread {
    fn schedule_long_running(&self, action: LongRunningAction) -> BoxDisposable {
        let cancel = Arc::new(BooleanDisposable::new());
        {
            let cancel = cancel.clone();
            self.spawn(move || action(&cancel));
        }
        Box::new(cancel)
    }
}
