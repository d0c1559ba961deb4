//! Element-wise transformation.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::error::{Error, Result};
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};


/// Applies a function to every value.
pub struct Map<T, U, F> {
    source: Observable<T>,
    selector: Arc<F>,
    _output: PhantomData<fn() -> U>,
}

impl<T, U, F> Map<T, U, F> {
    /// Map the values of `source` with `selector`.
    pub fn new(source: Observable<T>, selector: F) -> Map<T, U, F> {
        Map { source, selector: Arc::new(selector), _output: PhantomData }
    }
}

impl<T, U, F> Producer for Map<T, U, F>
    where T: 'static,
          U: 'static,
          F: Fn(T) -> U + Send + Sync + 'static,
{
    type Item = U;
    type Sink = MapSink<T, U, F>;

    fn create_sink(&self, observer: ObserverRef<U>) -> Arc<MapSink<T, U, F>> {
        Arc::new(MapSink {
            sink: Sink::new(observer),
            selector: self.selector.clone(),
            _input: PhantomData,
        })
    }

    fn run(&self, sink: &Arc<MapSink<T, U, F>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`Map`].
pub struct MapSink<T, U, F> {
    sink: Sink<U>,
    selector: Arc<F>,
    _input: PhantomData<fn(T)>,
}

impl<T, U: 'static, F> AsSink for MapSink<T, U, F> {
    type Item = U;
    fn sink(&self) -> &Sink<U> { &self.sink }
}

impl<T, U, F> Observer<T> for MapSink<T, U, F>
    where U: 'static, F: Fn(T) -> U + Send + Sync,
{
    fn on_next(&self, value: T) {
        self.sink.forward_on_next((self.selector)(value));
    }

    fn on_error(&self, error: Error) { self.sink.forward_on_error(error) }
    fn on_completed(&self) { self.sink.forward_on_completed() }
}


/// Applies a fallible function to every value, failing the stream with the
/// first error it returns.
pub struct TryMap<T, U, F> {
    source: Observable<T>,
    selector: Arc<F>,
    _output: PhantomData<fn() -> U>,
}

impl<T, U, F> TryMap<T, U, F> {
    /// Map the values of `source` with `selector`.
    pub fn new(source: Observable<T>, selector: F) -> TryMap<T, U, F> {
        TryMap { source, selector: Arc::new(selector), _output: PhantomData }
    }
}

impl<T, U, F> Producer for TryMap<T, U, F>
    where T: 'static,
          U: 'static,
          F: Fn(T) -> Result<U> + Send + Sync + 'static,
{
    type Item = U;
    type Sink = TryMapSink<T, U, F>;

    fn create_sink(&self, observer: ObserverRef<U>) -> Arc<TryMapSink<T, U, F>> {
        Arc::new(TryMapSink {
            sink: Sink::new(observer),
            selector: self.selector.clone(),
            _input: PhantomData,
        })
    }

    fn run(&self, sink: &Arc<TryMapSink<T, U, F>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`TryMap`].
pub struct TryMapSink<T, U, F> {
    sink: Sink<U>,
    selector: Arc<F>,
    _input: PhantomData<fn(T)>,
}

impl<T, U: 'static, F> AsSink for TryMapSink<T, U, F> {
    type Item = U;
    fn sink(&self) -> &Sink<U> { &self.sink }
}

impl<T, U, F> Observer<T> for TryMapSink<T, U, F>
    where U: 'static, F: Fn(T) -> Result<U> + Send + Sync,
{
    fn on_next(&self, value: T) {
        match (self.selector)(value) {
            Ok(mapped) => self.sink.forward_on_next(mapped),
            Err(error) => self.sink.forward_on_error(error),
        }
    }

    fn on_error(&self, error: Error) { self.sink.forward_on_error(error) }
    fn on_completed(&self) { self.sink.forward_on_completed() }
}
