//! Utilities for the test suite.
//!
//! These are public so that integration tests and downstream crates can check
//! the notifications their pipelines produce.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::disposable::Disposable;
use crate::error::Error;
use crate::observer::{Notification, Observer};
use crate::sync::lock;


/// The identity function.
pub fn id<T>(t: T) -> T { t }


/// An observer that records every notification it receives.
///
/// Unlike a well-behaved sink it does not enforce the observer grammar, so
/// tests can see exactly what reached the end of a pipeline.
pub struct Recorder<T> {
    notifications: Mutex<Vec<Notification<T>>>,
}

impl<T> Recorder<T> {
    /// Create a shared recorder ready to be subscribed.
    pub fn new() -> Arc<Recorder<T>> {
        Arc::new(Recorder { notifications: Mutex::new(vec![]) })
    }

    /// Number of notifications received so far.
    pub fn len(&self) -> usize {
        lock(&self.notifications).len()
    }

    /// Whether nothing was received yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of terminal notifications received.
    pub fn terminal_count(&self) -> usize {
        lock(&self.notifications).iter().filter(|n| n.is_terminal()).count()
    }

    /// Whether a completion was received.
    pub fn is_completed(&self) -> bool {
        lock(&self.notifications).iter().any(|n| match n {
            Notification::Completed => true,
            _ => false,
        })
    }

    /// The first error received, if any.
    pub fn error(&self) -> Option<Error> {
        lock(&self.notifications).iter().filter_map(|n| match n {
            Notification::Error(error) => Some(error.clone()),
            _ => None,
        }).next()
    }
}

impl<T: Clone> Recorder<T> {
    /// A copy of everything received so far.
    pub fn notifications(&self) -> Vec<Notification<T>> {
        lock(&self.notifications).clone()
    }

    /// The values received so far.
    pub fn values(&self) -> Vec<T> {
        lock(&self.notifications).iter().filter_map(|n| match n {
            Notification::Next(value) => Some(value.clone()),
            _ => None,
        }).collect()
    }
}

impl<T: Send> Observer<T> for Recorder<T> {
    fn on_next(&self, value: T) {
        lock(&self.notifications).push(Notification::Next(value));
    }

    fn on_error(&self, error: Error) {
        lock(&self.notifications).push(Notification::Error(error));
    }

    fn on_completed(&self) {
        lock(&self.notifications).push(Notification::Completed);
    }
}


/// A disposable that counts how often it was disposed.
///
/// Clones share the counter, so a test can keep one clone and hand the other
/// to the code under test.
#[derive(Debug, Clone, Default)]
pub struct CountingDisposable {
    count: Arc<AtomicUsize>,
}

impl CountingDisposable {
    /// Create a handle that has not been disposed.
    pub fn new() -> CountingDisposable {
        CountingDisposable::default()
    }

    /// How many times `dispose` was called.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Disposable for CountingDisposable {
    fn dispose(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.count() > 0
    }
}
