//! Group of cancellation handles.

use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::thread;

use crate::sync::lock;
use super::{BoxDisposable, Disposable};


/// A group of handles released together, in insertion order.
///
/// A child that panics while being disposed does not stop the teardown: the
/// remaining children are still released. Once every child has been handled
/// the first panic is resumed and any later ones are logged and dropped.
pub struct CompositeDisposable {
    children: Mutex<Option<Vec<BoxDisposable>>>,
}

impl Default for CompositeDisposable {
    fn default() -> CompositeDisposable {
        CompositeDisposable::from_vec(vec![])
    }
}

impl CompositeDisposable {
    /// Create an empty group.
    pub fn new() -> CompositeDisposable {
        CompositeDisposable::default()
    }

    /// Create a group owning `children`.
    pub fn from_vec(children: Vec<BoxDisposable>) -> CompositeDisposable {
        CompositeDisposable { children: Mutex::new(Some(children)) }
    }

    /// Add a handle to the group. If the group is already disposed the handle
    /// is disposed immediately.
    pub fn add(&self, child: BoxDisposable) {
        {
            let mut children = lock(&self.children);
            if let Some(children) = children.as_mut() {
                children.push(child);
                return;
            }
        }
        child.dispose();
    }

    /// Number of handles currently held.
    pub fn len(&self) -> usize {
        lock(&self.children).as_ref().map_or(0, Vec::len)
    }

    /// Whether the group holds no handles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Disposable for CompositeDisposable {
    fn dispose(&self) {
        let children = match mem::replace(&mut *lock(&self.children), None) {
            Some(children) => children,
            None => return,
        };
        let mut first_panic = None;
        for child in children {
            let result = panic::catch_unwind(AssertUnwindSafe(|| child.dispose()));
            if let Err(payload) = result {
                if first_panic.is_none() {
                    first_panic = Some(payload);
                } else {
                    tracing::warn!("disposable panicked during group teardown");
                }
            }
        }
        if let Some(payload) = first_panic {
            if !thread::panicking() {
                panic::resume_unwind(payload);
            }
            tracing::warn!("disposable panicked during group teardown");
        }
    }

    fn is_disposed(&self) -> bool {
        lock(&self.children).is_none()
    }
}


#[cfg(test)]
mod test {
    use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
    use crate::disposable;
    use crate::testing::CountingDisposable;
    use super::*;

    #[test]
    fn disposes_children_once() {
        let a = CountingDisposable::new();
        let b = CountingDisposable::new();
        let group = CompositeDisposable::from_vec(vec![
            Box::new(a.clone()),
            Box::new(b.clone()),
        ]);
        assert_eq!(group.len(), 2);
        group.dispose();
        group.dispose();
        assert!(group.is_disposed());
        assert!(group.is_empty());
        assert_eq!((a.count(), b.count()), (1, 1));
    }

    #[test]
    fn add_after_dispose_releases_immediately() {
        let group = CompositeDisposable::new();
        group.dispose();
        let late = CountingDisposable::new();
        group.add(Box::new(late.clone()));
        assert_eq!(late.count(), 1);
        assert_eq!(group.len(), 0);
    }

    #[test]
    fn panicking_child_does_not_abort_teardown() {
        let after = CountingDisposable::new();
        let group = CompositeDisposable::from_vec(vec![
            Box::new(disposable::create(|| resume_unwind(Box::new("child failed")))),
            Box::new(after.clone()),
        ]);
        let result = catch_unwind(AssertUnwindSafe(|| group.dispose()));
        assert!(result.is_err());
        assert_eq!(after.count(), 1);
        assert!(group.is_disposed());
    }
}
