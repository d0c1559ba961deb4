//! Value selection.

use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};


/// Passes on the values satisfying a predicate.
pub struct Filter<T, F> {
    source: Observable<T>,
    predicate: Arc<F>,
}

impl<T, F> Filter<T, F> {
    /// Filter `source` by `predicate`.
    pub fn new(source: Observable<T>, predicate: F) -> Filter<T, F> {
        Filter { source, predicate: Arc::new(predicate) }
    }
}

impl<T, F> Producer for Filter<T, F>
    where T: 'static, F: Fn(&T) -> bool + Send + Sync + 'static,
{
    type Item = T;
    type Sink = FilterSink<T, F>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<FilterSink<T, F>> {
        Arc::new(FilterSink { sink: Sink::new(observer), predicate: self.predicate.clone() })
    }

    fn run(&self, sink: &Arc<FilterSink<T, F>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`Filter`].
pub struct FilterSink<T, F> {
    sink: Sink<T>,
    predicate: Arc<F>,
}

impl<T: 'static, F> AsSink for FilterSink<T, F> {
    type Item = T;
    fn sink(&self) -> &Sink<T> { &self.sink }
}

impl<T, F> Observer<T> for FilterSink<T, F>
    where T: 'static, F: Fn(&T) -> bool + Send + Sync,
{
    fn on_next(&self, value: T) {
        if (self.predicate)(&value) {
            self.sink.forward_on_next(value);
        }
    }

    fn on_error(&self, error: Error) { self.sink.forward_on_error(error) }
    fn on_completed(&self) { self.sink.forward_on_completed() }
}
