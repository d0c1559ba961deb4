//! First value, and a fallback for empty sources.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};


/// Emits the first value and completes, or fails with
/// [`Error::NoElements`] if the source completes empty.
pub struct First<T> {
    source: Observable<T>,
}

impl<T> First<T> {
    /// Take the first value of `source`.
    pub fn new(source: Observable<T>) -> First<T> {
        First { source }
    }
}

impl<T: 'static> Producer for First<T> {
    type Item = T;
    type Sink = FirstSink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<FirstSink<T>> {
        Arc::new(FirstSink { sink: Sink::new(observer) })
    }

    fn run(&self, sink: &Arc<FirstSink<T>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`First`].
pub struct FirstSink<T> {
    sink: Sink<T>,
}

impl<T: 'static> AsSink for FirstSink<T> {
    type Item = T;
    fn sink(&self) -> &Sink<T> { &self.sink }
}

impl<T: 'static> Observer<T> for FirstSink<T> {
    fn on_next(&self, value: T) {
        self.sink.forward_on_next(value);
        self.sink.forward_on_completed();
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        self.sink.forward_on_error(Error::NoElements);
    }
}


/// Passes values through, emitting a default first if the source completes
/// empty.
pub struct DefaultIfEmpty<T> {
    source: Observable<T>,
    default: T,
}

impl<T> DefaultIfEmpty<T> {
    /// Fall back to `default` when `source` is empty.
    pub fn new(source: Observable<T>, default: T) -> DefaultIfEmpty<T> {
        DefaultIfEmpty { source, default }
    }
}

impl<T: Clone + Send + Sync + 'static> Producer for DefaultIfEmpty<T> {
    type Item = T;
    type Sink = DefaultIfEmptySink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<DefaultIfEmptySink<T>> {
        Arc::new(DefaultIfEmptySink {
            sink: Sink::new(observer),
            default: self.default.clone(),
            seen: AtomicBool::new(false),
        })
    }

    fn run(&self, sink: &Arc<DefaultIfEmptySink<T>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`DefaultIfEmpty`].
pub struct DefaultIfEmptySink<T> {
    sink: Sink<T>,
    default: T,
    seen: AtomicBool,
}

impl<T: 'static> AsSink for DefaultIfEmptySink<T> {
    type Item = T;
    fn sink(&self) -> &Sink<T> { &self.sink }
}

impl<T: Clone + Send + Sync + 'static> Observer<T> for DefaultIfEmptySink<T> {
    fn on_next(&self, value: T) {
        self.seen.store(true, Ordering::Release);
        self.sink.forward_on_next(value);
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        if !self.seen.load(Ordering::Acquire) {
            self.sink.forward_on_next(self.default.clone());
        }
        self.sink.forward_on_completed();
    }
}


#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::observable::Observable;
    use crate::observer::Notification;
    use crate::testing::Recorder;

    #[test]
    fn first() {
        let recorder = Recorder::<i32>::new();
        Observable::from_iter(vec![7, 8, 9]).first().subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Next(7), Notification::Completed]);
    }

    #[test]
    fn first_of_empty_fails() {
        let recorder = Recorder::<i32>::new();
        Observable::<i32>::empty().first().subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Error(Error::NoElements)]);
    }

    #[test]
    fn default_if_empty() {
        let (empty, full) = (Recorder::<i32>::new(), Recorder::<i32>::new());
        Observable::empty().default_if_empty(-1).subscribe(empty.clone());
        Observable::from_iter(vec![1, 2]).default_if_empty(-1).subscribe(full.clone());
        assert_eq!(empty.values(), vec![-1]);
        assert_eq!(full.values(), vec![1, 2]);
        assert!(empty.is_completed() && full.is_completed());
    }
}
