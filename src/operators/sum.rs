//! Checked summation.

use std::sync::{Arc, Mutex};

use crate::disposable::BoxDisposable;
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};
use crate::sync::lock;


/// Values that can be summed.
///
/// Integer addition is checked: a sum that leaves the range of the type fails
/// the stream with [`Error::Overflow`]. Float addition never fails.
pub trait Summand: Copy + Send + Sync + 'static {
    /// The sum of no values.
    const ZERO: Self;

    /// Add, or `None` on overflow.
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! integer_summand {
    ($($t:ty),*) => {$(
        impl Summand for $t {
            const ZERO: $t = 0;
            fn checked_add(self, other: $t) -> Option<$t> { <$t>::checked_add(self, other) }
        }
    )*}
}

macro_rules! float_summand {
    ($($t:ty),*) => {$(
        impl Summand for $t {
            const ZERO: $t = 0.0;
            fn checked_add(self, other: $t) -> Option<$t> { Some(self + other) }
        }
    )*}
}

integer_summand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_summand!(f32, f64);


/// Emits the sum of all values once the source completes.
pub struct Sum<T> {
    source: Observable<T>,
}

impl<T> Sum<T> {
    /// Sum the values of `source`.
    pub fn new(source: Observable<T>) -> Sum<T> {
        Sum { source }
    }
}

impl<T: Summand> Producer for Sum<T> {
    type Item = T;
    type Sink = SumSink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<SumSink<T>> {
        Arc::new(SumSink { sink: Sink::new(observer), total: Mutex::new(T::ZERO) })
    }

    fn run(&self, sink: &Arc<SumSink<T>>) -> BoxDisposable {
        self.source.subscribe_raw(sink.clone(), false)
    }
}

/// Per-subscription state of [`Sum`].
pub struct SumSink<T> {
    sink: Sink<T>,
    total: Mutex<T>,
}

impl<T: 'static> AsSink for SumSink<T> {
    type Item = T;
    fn sink(&self) -> &Sink<T> { &self.sink }
}

impl<T: Summand> Observer<T> for SumSink<T> {
    fn on_next(&self, value: T) {
        let overflowed = {
            let mut total = lock(&self.total);
            match total.checked_add(value) {
                Some(sum) => {
                    *total = sum;
                    false
                },
                None => true,
            }
        };
        if overflowed {
            tracing::debug!("sum overflowed");
            self.sink.forward_on_error(Error::Overflow);
        }
    }

    fn on_error(&self, error: Error) {
        self.sink.forward_on_error(error);
    }

    fn on_completed(&self) {
        let total = *lock(&self.total);
        self.sink.forward_on_next(total);
        self.sink.forward_on_completed();
    }
}


#[cfg(test)]
mod test {
    use quickcheck::quickcheck;

    use crate::error::Error;
    use crate::observable::Observable;
    use crate::observer::Notification;
    use crate::testing::Recorder;

    #[test]
    fn sum() {
        let recorder = Recorder::<i32>::new();
        Observable::from_iter(vec![1, 2, 3]).sum().subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Next(6), Notification::Completed]);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let recorder = Recorder::<u8>::new();
        Observable::<u8>::empty().sum().subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Next(0), Notification::Completed]);
    }

    #[test]
    fn overflow_fails_once() {
        let recorder = Recorder::<i32>::new();
        Observable::from_iter(vec![i32::MAX, 1, 1]).sum().subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Error(Error::Overflow)]);
    }

    #[test]
    fn floats() {
        let recorder = Recorder::<f64>::new();
        Observable::from_iter(vec![0.5, 0.25]).sum().subscribe(recorder.clone());
        assert_eq!(recorder.values(), vec![0.75]);
    }

    quickcheck! {
        fn matches_checked_fold(values: Vec<i8>) -> bool {
            let recorder = Recorder::<i8>::new();
            Observable::from_iter(values.clone()).sum().subscribe(recorder.clone());
            let expected = values.iter().try_fold(0i8, |a, &b| a.checked_add(b));
            match expected {
                Some(total) => recorder.notifications()
                    == vec![Notification::Next(total), Notification::Completed],
                None => recorder.notifications() == vec![Notification::Error(Error::Overflow)],
            }
        }
    }
}
