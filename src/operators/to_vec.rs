//! Collecting into a vector.

use std::mem;
use std::sync::{Arc, Mutex};

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};
use crate::sync::lock;


/// Emits every value collected into a `Vec` once the source completes.
pub struct ToVec<T> {
    source: Observable<T>,
}

impl<T> ToVec<T> {
    /// Collect the values of `source`.
    pub fn new(source: Observable<T>) -> ToVec<T> {
        ToVec { source }
    }
}

impl<T: Send + 'static> Producer for ToVec<T> {
    type Item = Vec<T>;
    type Sink = ToVecSink<T>;

    fn create_sink(&self, observer: ObserverRef<Vec<T>>) -> Arc<ToVecSink<T>> {
        Arc::new(ToVecSink { sink: Sink::new(observer), values: Mutex::new(vec![]) })
    }

    fn run(&self, sink: &Arc<ToVecSink<T>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`ToVec`].
pub struct ToVecSink<T> {
    sink: Sink<Vec<T>>,
    values: Mutex<Vec<T>>,
}

impl<T: 'static> AsSink for ToVecSink<T> {
    type Item = Vec<T>;
    fn sink(&self) -> &Sink<Vec<T>> { &self.sink }
}

impl<T: Send + 'static> Observer<T> for ToVecSink<T> {
    fn on_next(&self, value: T) {
        lock(&self.values).push(value);
    }

    fn on_error(&self, error: Error) {
        lock(&self.values).clear();
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        let values = mem::replace(&mut *lock(&self.values), vec![]);
        self.sink.forward_on_next(values);
        self.sink.forward_on_completed();
    }
}


#[cfg(test)]
mod test {
    use crate::observable::Observable;
    use crate::observer::Notification;
    use crate::testing::Recorder;

    #[test]
    fn collects_in_order() {
        let recorder = Recorder::<Vec<i32>>::new();
        Observable::from_iter(vec![3, 1, 2]).to_vec().subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Next(vec![3, 1, 2]), Notification::Completed]);
    }
}
