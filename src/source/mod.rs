//! Cold sources.
//!
//! Each subscription to a cold source replays it from the start, on the
//! subscriber's own sink.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::disposable::{self, BoxDisposable};
use crate::error::Error;
use crate::observer::ObserverRef;
use crate::producer::Producer;
use crate::sink::Sink;

mod create;
mod iter;

pub use self::create::Create;
pub use self::iter::FromIter;


/// Emits one value, then completes.
pub struct Just<T> {
    value: T,
}

impl<T> Just<T> {
    /// A source of `value`.
    pub fn new(value: T) -> Just<T> {
        Just { value }
    }
}

impl<T: Clone + Send + Sync + 'static> Producer for Just<T> {
    type Item = T;
    type Sink = Sink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<Sink<T>> {
        Arc::new(Sink::new(observer))
    }

    fn run(&self, sink: &Arc<Sink<T>>) -> BoxDisposable {
        sink.forward_on_next(self.value.clone());
        sink.forward_on_completed();
        disposable::empty()
    }
}


/// Completes without emitting.
pub struct Empty<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
    /// An empty source.
    pub fn new() -> Empty<T> {
        Empty { _item: PhantomData }
    }
}

impl<T: 'static> Producer for Empty<T> {
    type Item = T;
    type Sink = Sink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<Sink<T>> {
        Arc::new(Sink::new(observer))
    }

    fn run(&self, sink: &Arc<Sink<T>>) -> BoxDisposable {
        sink.forward_on_completed();
        disposable::empty()
    }
}


/// Never emits and never terminates.
pub struct Never<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> Never<T> {
    /// A silent source.
    pub fn new() -> Never<T> {
        Never { _item: PhantomData }
    }
}

impl<T: 'static> Producer for Never<T> {
    type Item = T;
    type Sink = Sink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<Sink<T>> {
        Arc::new(Sink::new(observer))
    }

    fn run(&self, _: &Arc<Sink<T>>) -> BoxDisposable {
        disposable::empty()
    }
}


/// Fails immediately.
pub struct Throw<T> {
    error: Error,
    _item: PhantomData<fn() -> T>,
}

impl<T> Throw<T> {
    /// A source failing with `error`.
    pub fn new(error: Error) -> Throw<T> {
        Throw { error, _item: PhantomData }
    }
}

impl<T: 'static> Producer for Throw<T> {
    type Item = T;
    type Sink = Sink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<Sink<T>> {
        Arc::new(Sink::new(observer))
    }

    fn run(&self, sink: &Arc<Sink<T>>) -> BoxDisposable {
        sink.forward_on_error(self.error.clone());
        disposable::empty()
    }
}
