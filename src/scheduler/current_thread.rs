//! A per-thread trampoline.
//!
//! The first piece of work scheduled on a thread establishes a queue, runs
//! immediately and then drains the queue before returning. Anything scheduled
//! while the queue is being drained is appended to it instead of running
//! nested. Synchronous subscriptions that would otherwise recurse once per
//! operator thus run one after another, and the native stack stays flat no
//! matter how deeply a pipeline is composed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::disposable::{BoxDisposable, BooleanDisposable, Disposable};
use crate::drop::defer;
use super::{Action, Scheduler};


type Work = Box<dyn FnOnce() + 'static>;

// Work queued on this thread while the trampoline drains.
thread_local!(
    static QUEUE: RefCell<Option<VecDeque<Work>>> = RefCell::new(None)
);


/// Whether this thread is currently draining its trampoline.
pub fn is_active() -> bool {
    QUEUE.with(|queue| queue.borrow().is_some())
}

/// Run `work` on this thread's trampoline.
///
/// If the trampoline is already draining, `work` is queued and runs after
/// everything queued before it; this call then returns immediately.
/// Otherwise the trampoline is established, `work` runs right away, and the
/// queue is drained before this call returns.
///
/// If queued work panics, the queue is discarded and the trampoline reset,
/// so the thread stays usable.
pub fn trampoline<F: FnOnce() + 'static>(work: F) {
    let work: Work = Box::new(work);
    let work = QUEUE.with(|current| {
        let mut current = current.borrow_mut();
        match current.as_mut() {
            Some(queue) => {
                queue.push_back(work);
                None
            },
            None => {
                *current = Some(VecDeque::new());
                Some(work)
            },
        }
    });
    let work = match work {
        Some(work) => work,
        None => return,
    };
    tracing::trace!("trampoline established");
    let _reset = defer(|| {
        QUEUE.with(|current| current.borrow_mut().take());
        tracing::trace!("trampoline drained");
    });
    work();
    while let Some(next) = next_queued() {
        next();
    }
}

fn next_queued() -> Option<Work> {
    QUEUE.with(|current| current.borrow_mut().as_mut().and_then(VecDeque::pop_front))
}


/// The trampoline as a [`Scheduler`].
///
/// Actions run on the thread that schedules them: immediately if no
/// trampoline is active there, otherwise once the running work returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentThread;

impl Scheduler for CurrentThread {
    fn is_schedule_required(&self) -> bool {
        !is_active()
    }

    fn schedule(&self, action: Action) -> BoxDisposable {
        let cancel = Arc::new(BooleanDisposable::new());
        {
            let cancel = cancel.clone();
            trampoline(move || {
                if !cancel.is_disposed() {
                    action();
                }
            });
        }
        Box::new(cancel)
    }
}


#[cfg(test)]
mod test {
    use std::cell::{Cell, RefCell};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use super::*;

    #[test]
    fn runs_immediately_when_idle() {
        let ran = Rc::new(Cell::new(false));
        {
            let ran = ran.clone();
            trampoline(move || ran.set(true));
        }
        assert!(ran.get());
        assert!(!is_active());
    }

    #[test]
    fn nested_work_is_queued_in_order() {
        let log = Rc::new(RefCell::new(vec![]));
        {
            let log = log.clone();
            trampoline(move || {
                assert!(is_active());
                for k in 1..4 {
                    let log = log.clone();
                    trampoline(move || log.borrow_mut().push(k));
                }
                log.borrow_mut().push(0);
            });
        }
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn recursion_is_flattened() {
        fn recurse(n: usize, depth: Rc<Cell<usize>>, max: Rc<Cell<usize>>) {
            depth.set(depth.get() + 1);
            max.set(max.get().max(depth.get()));
            if n > 0 {
                let (d, m) = (depth.clone(), max.clone());
                trampoline(move || recurse(n - 1, d, m));
            }
            depth.set(depth.get() - 1);
        }
        let depth = Rc::new(Cell::new(0));
        let max = Rc::new(Cell::new(0));
        {
            let (d, m) = (depth.clone(), max.clone());
            trampoline(move || recurse(100_000, d, m));
        }
        assert_eq!(max.get(), 1);
    }

    #[test]
    fn panic_resets_trampoline() {
        let result = catch_unwind(AssertUnwindSafe(|| {
            trampoline(|| {
                trampoline(|| panic!("queued work failed"));
            });
        }));
        assert!(result.is_err());
        assert!(!is_active());
    }

    #[test]
    fn scheduled_action_can_be_cancelled_while_queued() {
        let log = Arc::new(Mutex::new(vec![]));
        {
            let log = log.clone();
            trampoline(move || {
                let handle = {
                    let log = log.clone();
                    CurrentThread.schedule(Box::new(move || log.lock().unwrap().push("cancelled")))
                };
                handle.dispose();
                let log2 = log.clone();
                CurrentThread.schedule(Box::new(move || log2.lock().unwrap().push("ran")));
                assert!(!CurrentThread.is_schedule_required());
            });
        }
        assert_eq!(*log.lock().unwrap(), vec!["ran"]);
        assert!(CurrentThread.is_schedule_required());
    }
}
