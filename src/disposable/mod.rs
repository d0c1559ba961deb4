//! Cancellation handles.
//!
//! A disposable is a revocable capability: whoever holds it owns some
//! resource or subscription and may release it by calling `dispose`. Every
//! handle in this module is idempotent and safe to dispose concurrently from
//! several threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::sync::lock;

mod binary;
mod composite;
mod single;

pub use self::binary::BinaryDisposable;
pub use self::composite::CompositeDisposable;
pub use self::single::{Assignment, SingleAssignmentDisposable};


/// A handle to a resource that can be released.
pub trait Disposable: Send + Sync {
    /// Release the resource. Calling this more than once has no further
    /// effect.
    fn dispose(&self);

    /// Whether `dispose` has been called.
    fn is_disposed(&self) -> bool;
}

/// An owned, type-erased cancellation handle.
pub type BoxDisposable = Box<dyn Disposable>;

impl<D: Disposable + ?Sized> Disposable for Arc<D> {
    fn dispose(&self) { (**self).dispose() }
    fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&self) { (**self).dispose() }
    fn is_disposed(&self) -> bool { (**self).is_disposed() }
}


type Action = Box<dyn FnOnce() + Send + 'static>;

/// A disposable that runs a closure the first time it is disposed.
pub struct AnonymousDisposable {
    action: Mutex<Option<Action>>,
    disposed: AtomicBool,
}

impl Disposable for AnonymousDisposable {
    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        let action = lock(&self.action).take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

/// Create a disposable that runs `action` exactly once, on the first call to
/// `dispose`.
///
/// ```
/// # use reagent::disposable::{self, Disposable};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let count = Arc::new(AtomicUsize::new(0));
/// let handle = {
///     let count = count.clone();
///     disposable::create(move || { count.fetch_add(1, Ordering::SeqCst); })
/// };
/// handle.dispose();
/// handle.dispose();
/// assert_eq!(count.load(Ordering::SeqCst), 1);
/// ```
pub fn create<F>(action: F) -> AnonymousDisposable
    where F: FnOnce() + Send + 'static,
{
    AnonymousDisposable {
        action: Mutex::new(Some(Box::new(action))),
        disposed: AtomicBool::new(false),
    }
}


/// A handle with nothing to release.
#[derive(Debug, Default, Clone, Copy)]
pub struct Empty;

impl Disposable for Empty {
    fn dispose(&self) {}
    fn is_disposed(&self) -> bool { false }
}

/// A handle with nothing to release.
pub fn empty() -> BoxDisposable {
    Box::new(Empty)
}


/// A cancellation flag.
///
/// Long-running loops poll it between iterations to find out whether they
/// should stop.
#[derive(Debug, Default)]
pub struct BooleanDisposable {
    disposed: AtomicBool,
}

impl BooleanDisposable {
    /// Create a flag that is not yet disposed.
    pub fn new() -> BooleanDisposable {
        BooleanDisposable::default()
    }
}

impl Disposable for BooleanDisposable {
    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}


#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use super::*;

    #[test]
    fn anonymous_runs_once_across_threads() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::new({
            let count = count.clone();
            create(move || { count.fetch_add(1, Ordering::SeqCst); })
        });
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || handle.dispose())
            })
            .collect();
        for thread in threads { thread.join().unwrap(); }
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(handle.is_disposed());
    }

    #[test]
    fn boolean_flag() {
        let flag = BooleanDisposable::new();
        assert!(!flag.is_disposed());
        flag.dispose();
        assert!(flag.is_disposed());
    }

    #[test]
    fn boxed_and_shared_forward() {
        let flag = Arc::new(BooleanDisposable::new());
        let boxed: BoxDisposable = Box::new(flag.clone());
        boxed.dispose();
        assert!(flag.is_disposed());
        assert!(boxed.is_disposed());
    }
}
