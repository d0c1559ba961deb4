//! Counting values.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};
use crate::sync::lock;


/// Emits the number of values once the source completes.
pub struct Count<T> {
    source: Observable<T>,
}

impl<T> Count<T> {
    /// Count the values of `source`.
    pub fn new(source: Observable<T>) -> Count<T> {
        Count { source }
    }
}

impl<T: 'static> Producer for Count<T> {
    type Item = usize;
    type Sink = CountSink<T>;

    fn create_sink(&self, observer: ObserverRef<usize>) -> Arc<CountSink<T>> {
        Arc::new(CountSink { sink: Sink::new(observer), count: Mutex::new(0), _input: PhantomData })
    }

    fn run(&self, sink: &Arc<CountSink<T>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`Count`].
pub struct CountSink<T> {
    sink: Sink<usize>,
    count: Mutex<usize>,
    _input: PhantomData<fn(T)>,
}

impl<T> AsSink for CountSink<T> {
    type Item = usize;
    fn sink(&self) -> &Sink<usize> { &self.sink }
}

impl<T> Observer<T> for CountSink<T> {
    fn on_next(&self, _: T) {
        let overflowed = {
            let mut count = lock(&self.count);
            match count.checked_add(1) {
                Some(next) => {
                    *count = next;
                    false
                },
                None => true,
            }
        };
        if overflowed {
            self.sink.forward_on_error(Error::Overflow);
        }
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        let count = *lock(&self.count);
        self.sink.forward_on_next(count);
        self.sink.forward_on_completed();
    }
}
