//! Consumers of notification streams.

use std::sync::Arc;

use crate::error::Error;


/// A consumer of a notification stream.
///
/// Notifications follow the observer grammar: any number of `on_next` calls,
/// then at most one of `on_error` or `on_completed`, then silence.
///
/// Methods take `&self` because an observer is shared between the producer
/// feeding it and the handle that may cancel it from another thread. State
/// that changes per notification lives behind interior mutability.
pub trait Observer<T>: Send + Sync {
    /// Deliver a value.
    fn on_next(&self, value: T);

    /// Deliver a terminal error.
    fn on_error(&self, error: Error);

    /// Deliver successful termination.
    fn on_completed(&self);
}

/// A shared, type-erased observer.
pub type ObserverRef<T> = Arc<dyn Observer<T>>;


/// An observer that ignores everything.
///
/// Sinks retarget their downstream to this observer on teardown, so the
/// forwarding path never has to check for a missing observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopObserver;

impl<T> Observer<T> for NopObserver {
    fn on_next(&self, _: T) {}
    fn on_error(&self, _: Error) {}
    fn on_completed(&self) {}
}


type NextFn<T> = Box<dyn Fn(T) + Send + Sync + 'static>;
type ErrorFn = Box<dyn Fn(Error) + Send + Sync + 'static>;
type CompletedFn = Box<dyn Fn() + Send + Sync + 'static>;

/// An observer built from closures.
///
/// ```
/// # use reagent::{AnonymousObserver, Observable};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let observer = {
///     let seen = seen.clone();
///     AnonymousObserver::new(move |x: i32| seen.lock().unwrap().push(x))
///         .with_completed(|| println!("done"))
/// };
/// Observable::from_iter(vec![1, 2]).subscribe(Arc::new(observer));
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct AnonymousObserver<T> {
    next: NextFn<T>,
    error: ErrorFn,
    completed: CompletedFn,
}

impl<T> AnonymousObserver<T> {
    /// Create an observer handling values with `on_next`.
    ///
    /// Errors are logged, completion is ignored, until replaced with
    /// `with_error` and `with_completed`.
    pub fn new<F>(on_next: F) -> AnonymousObserver<T>
        where F: Fn(T) + Send + Sync + 'static,
    {
        AnonymousObserver {
            next: Box::new(on_next),
            error: Box::new(|error| tracing::warn!(%error, "unhandled stream error")),
            completed: Box::new(|| ()),
        }
    }

    /// Replace the error handler.
    pub fn with_error<F>(self, on_error: F) -> AnonymousObserver<T>
        where F: Fn(Error) + Send + Sync + 'static,
    {
        AnonymousObserver { error: Box::new(on_error), ..self }
    }

    /// Replace the completion handler.
    pub fn with_completed<F>(self, on_completed: F) -> AnonymousObserver<T>
        where F: Fn() + Send + Sync + 'static,
    {
        AnonymousObserver { completed: Box::new(on_completed), ..self }
    }
}

impl<T> Observer<T> for AnonymousObserver<T> {
    fn on_next(&self, value: T) { (self.next)(value) }
    fn on_error(&self, error: Error) { (self.error)(error) }
    fn on_completed(&self) { (self.completed)() }
}


/// A notification reified as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T> {
    /// A value.
    Next(T),
    /// A terminal error.
    Error(Error),
    /// Successful termination.
    Completed,
}

impl<T> Notification<T> {
    /// Whether this notification ends the stream.
    pub fn is_terminal(&self) -> bool {
        match self {
            Notification::Next(_) => false,
            _ => true,
        }
    }

    /// Deliver this notification to `observer`.
    pub fn accept<O: Observer<T> + ?Sized>(self, observer: &O) {
        match self {
            Notification::Next(value) => observer.on_next(value),
            Notification::Error(error) => observer.on_error(error),
            Notification::Completed => observer.on_completed(),
        }
    }
}


#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};
    use crate::testing::Recorder;
    use super::*;

    #[test]
    fn anonymous_observer_dispatches() {
        let log = Arc::new(Mutex::new(vec![]));
        let observer = {
            let (a, b, c) = (log.clone(), log.clone(), log.clone());
            AnonymousObserver::new(move |x: i32| a.lock().unwrap().push(format!("next {}", x)))
                .with_error(move |e| b.lock().unwrap().push(format!("error {}", e)))
                .with_completed(move || c.lock().unwrap().push("completed".to_string()))
        };
        observer.on_next(4);
        observer.on_error(Error::Overflow);
        observer.on_completed();
        assert_eq!(*log.lock().unwrap(), vec![
            "next 4".to_string(),
            "error arithmetic operation resulted in an overflow".to_string(),
            "completed".to_string(),
        ]);
    }

    #[test]
    fn notification_accept() {
        let recorder = Recorder::<i32>::new();
        Notification::Next(3).accept(&*recorder);
        Notification::Completed.accept(&*recorder);
        assert_eq!(recorder.values(), vec![3]);
        assert!(recorder.is_completed());
        assert!(Notification::<i32>::Error(Error::NoElements).is_terminal());
    }
}
