//! Sources built from a subscribe closure.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::observer::ObserverRef;
use crate::producer::Producer;
use crate::sink::Sink;


/// A source that calls a closure for every subscription.
///
/// The closure receives an observer that enforces the grammar: whatever it
/// emits after a terminal notification, or after the subscription was
/// disposed, is dropped. The handle it returns is disposed when the
/// subscription ends.
pub struct Create<T, F> {
    subscribe: F,
    _item: PhantomData<fn() -> T>,
}

impl<T, F> Create<T, F> {
    /// Wrap `subscribe`.
    pub fn new(subscribe: F) -> Create<T, F> {
        Create { subscribe, _item: PhantomData }
    }
}

impl<T, F> Producer for Create<T, F>
    where T: 'static,
          F: Fn(ObserverRef<T>) -> BoxDisposable + Send + Sync + 'static,
{
    type Item = T;
    type Sink = Sink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<Sink<T>> {
        Arc::new(Sink::new(observer))
    }

    fn run(&self, sink: &Arc<Sink<T>>) -> BoxDisposable {
        (self.subscribe)(sink.clone())
    }
}
