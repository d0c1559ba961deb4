//! Existential and universal tests.

use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};


/// Emits whether any value satisfies a predicate.
///
/// Stops at the first match and disposes the upstream subscription.
pub struct Any<T, F> {
    source: Observable<T>,
    predicate: Arc<F>,
}

impl<T, F> Any<T, F> {
    /// Test `source` with `predicate`.
    pub fn new(source: Observable<T>, predicate: F) -> Any<T, F> {
        Any { source, predicate: Arc::new(predicate) }
    }
}

impl<T, F> Producer for Any<T, F>
    where T: 'static, F: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Item = bool;
    type Sink = AnySink<F>;

    fn create_sink(&self, observer: ObserverRef<bool>) -> Arc<AnySink<F>> {
        Arc::new(AnySink { sink: Sink::new(observer), predicate: self.predicate.clone() })
    }

    fn run(&self, sink: &Arc<AnySink<F>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`Any`].
pub struct AnySink<F> {
    sink: Sink<bool>,
    predicate: Arc<F>,
}

impl<F> AsSink for AnySink<F> {
    type Item = bool;
    fn sink(&self) -> &Sink<bool> { &self.sink }
}

impl<T, F> Observer<T> for AnySink<F>
    where F: Fn(&T) -> bool + Send + Sync,
{
    fn on_next(&self, value: T) {
        if (self.predicate)(&value) {
            self.sink.forward_on_next(true);
            self.sink.forward_on_completed();
        }
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        self.sink.forward_on_next(false);
        self.sink.forward_on_completed();
    }
}


/// Emits whether every value satisfies a predicate.
///
/// Stops at the first value that does not and disposes the upstream
/// subscription.
pub struct All<T, F> {
    source: Observable<T>,
    predicate: Arc<F>,
}

impl<T, F> All<T, F> {
    /// Test `source` with `predicate`.
    pub fn new(source: Observable<T>, predicate: F) -> All<T, F> {
        All { source, predicate: Arc::new(predicate) }
    }
}

impl<T, F> Producer for All<T, F>
    where T: 'static, F: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Item = bool;
    type Sink = AllSink<F>;

    fn create_sink(&self, observer: ObserverRef<bool>) -> Arc<AllSink<F>> {
        Arc::new(AllSink { sink: Sink::new(observer), predicate: self.predicate.clone() })
    }

    fn run(&self, sink: &Arc<AllSink<F>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`All`].
pub struct AllSink<F> {
    sink: Sink<bool>,
    predicate: Arc<F>,
}

impl<F> AsSink for AllSink<F> {
    type Item = bool;
    fn sink(&self) -> &Sink<bool> { &self.sink }
}

impl<T, F> Observer<T> for AllSink<F>
    where F: Fn(&T) -> bool + Send + Sync,
{
    fn on_next(&self, value: T) {
        if !(self.predicate)(&value) {
            self.sink.forward_on_next(false);
            self.sink.forward_on_completed();
        }
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        self.sink.forward_on_next(true);
        self.sink.forward_on_completed();
    }
}


#[cfg(test)]
mod test {
    use quickcheck::quickcheck;

    use crate::observable::Observable;
    use crate::observer::{Notification, Observer};
    use crate::testing::{CountingDisposable, Recorder};

    #[test]
    fn any_stops_at_first_match() {
        let upstream = CountingDisposable::new();
        let source = {
            let upstream = upstream.clone();
            Observable::<i32>::create(move |observer| {
                for x in 1..10 {
                    observer.on_next(x);
                }
                observer.on_completed();
                Box::new(upstream.clone())
            })
        };
        let recorder = Recorder::<bool>::new();
        source.any(|x| *x == 2).subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Next(true), Notification::Completed]);
        assert_eq!(upstream.count(), 1);
    }

    #[test]
    fn all_and_contains() {
        let (all, contains) = (Recorder::<bool>::new(), Recorder::<bool>::new());
        let source = Observable::from_iter(vec![2, 4, 5]);
        source.all(|x| x % 2 == 0).subscribe(all.clone());
        source.contains(5).subscribe(contains.clone());
        assert_eq!(all.values(), vec![false]);
        assert_eq!(contains.values(), vec![true]);
    }

    quickcheck! {
        fn agree_with_iterator(values: Vec<u8>) -> bool {
            let (any, all) = (Recorder::<bool>::new(), Recorder::<bool>::new());
            let source = Observable::from_iter(values.clone());
            source.any(|x| *x > 200).subscribe(any.clone());
            source.all(|x| *x > 10).subscribe(all.clone());
            any.values() == vec![values.iter().any(|x| *x > 200)]
                && all.values() == vec![values.iter().all(|x| *x > 10)]
                && any.is_completed() && all.is_completed()
        }
    }
}
