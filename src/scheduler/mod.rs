//! Where and when work runs.
//!
//! The engine itself never spawns threads. Operators that need to defer work
//! ask a [`Scheduler`]; the producer machinery only ever uses the current
//! thread's trampoline.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::disposable::{BoxDisposable, BooleanDisposable};

pub mod current_thread;
mod immediate;
mod new_thread;

pub use self::current_thread::CurrentThread;
pub use self::immediate::Immediate;
pub use self::new_thread::NewThread;


/// A unit of scheduled work.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// A unit of long-running work. It receives a flag that is disposed when the
/// work should stop, and is expected to poll it between iterations.
pub type LongRunningAction = Box<dyn FnOnce(&BooleanDisposable) + Send + 'static>;


/// Something that runs actions.
pub trait Scheduler: Send + Sync {
    /// Whether a caller on the current thread must go through `schedule`
    /// instead of running work directly.
    fn is_schedule_required(&self) -> bool { true }

    /// Run `action`, now or later. Disposing the returned handle cancels the
    /// action if it has not started yet.
    fn schedule(&self, action: Action) -> BoxDisposable;

    /// The long-running capability of this scheduler, if it has one.
    ///
    /// Operators with an uninterruptible loop, such as draining an iterator,
    /// prefer it over rescheduling themselves once per item.
    fn as_long_running(&self) -> Option<&dyn LongRunning> { None }
}

/// A scheduler able to dedicate a thread to a loop.
pub trait LongRunning: Send + Sync {
    /// Start `action` on its own thread. Disposing the returned handle
    /// disposes the flag passed to the action.
    fn schedule_long_running(&self, action: LongRunningAction) -> BoxDisposable;
}


lazy_static! {
    static ref CURRENT_THREAD: Arc<dyn Scheduler> = Arc::new(CurrentThread);
    static ref IMMEDIATE: Arc<dyn Scheduler> = Arc::new(Immediate);
    static ref NEW_THREAD: Arc<dyn Scheduler> = Arc::new(NewThread::new());
}

/// The shared trampoline scheduler of whichever thread uses it.
pub fn current_thread() -> Arc<dyn Scheduler> {
    CURRENT_THREAD.clone()
}

/// The shared scheduler running actions inline.
pub fn immediate() -> Arc<dyn Scheduler> {
    IMMEDIATE.clone()
}

/// The shared scheduler running each action on a new thread.
pub fn new_thread() -> Arc<dyn Scheduler> {
    NEW_THREAD.clone()
}
