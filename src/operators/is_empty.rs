//! Emptiness test.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};


/// Emits whether the source completes without a value.
///
/// The first value decides the answer, so the upstream subscription is
/// disposed as soon as it arrives.
pub struct IsEmpty<T> {
    source: Observable<T>,
}

impl<T> IsEmpty<T> {
    /// Test `source` for emptiness.
    pub fn new(source: Observable<T>) -> IsEmpty<T> {
        IsEmpty { source }
    }
}

impl<T: 'static> Producer for IsEmpty<T> {
    type Item = bool;
    type Sink = IsEmptySink<T>;

    fn create_sink(&self, observer: ObserverRef<bool>) -> Arc<IsEmptySink<T>> {
        Arc::new(IsEmptySink { sink: Sink::new(observer), _input: PhantomData })
    }

    fn run(&self, sink: &Arc<IsEmptySink<T>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`IsEmpty`].
pub struct IsEmptySink<T> {
    sink: Sink<bool>,
    _input: PhantomData<fn(T)>,
}

impl<T> AsSink for IsEmptySink<T> {
    type Item = bool;
    fn sink(&self) -> &Sink<bool> { &self.sink }
}

impl<T> Observer<T> for IsEmptySink<T> {
    fn on_next(&self, _: T) {
        self.sink.forward_on_next(false);
        self.sink.forward_on_completed();
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        self.sink.forward_on_next(true);
        self.sink.forward_on_completed();
    }
}
