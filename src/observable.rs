//! The user-facing stream type.

use std::sync::Arc;

use crate::disposable::BoxDisposable;
use crate::error::{Error, Result};
use crate::observer::{AnonymousObserver, ObserverRef};
use crate::operators::{
    All, Amb, Any, Count, DefaultIfEmpty, Filter, First, IsEmpty, Map, Sum, Summand, ToVec,
    TryMap,
};
use crate::producer::{Producer, Subscribe};
use crate::scheduler::{self, Scheduler};
use crate::source::{Create, Empty, FromIter, Just, Never, Throw};


/// A stream of notifications.
///
/// An observable is a cheap, clonable handle to a recipe. Nothing happens
/// until it is subscribed; every subscription then runs the recipe afresh,
/// with its own state, and returns a handle that cancels it.
///
/// ```
/// # use reagent::{Observable, Notification};
/// # use reagent::testing::Recorder;
/// let recorder = Recorder::<i32>::new();
/// Observable::from_iter(1..5)
///     .filter(|x| x % 2 == 0)
///     .map(|x| x * 10)
///     .sum()
///     .subscribe(recorder.clone());
/// assert_eq!(recorder.notifications(), vec![Notification::Next(60), Notification::Completed]);
/// ```
pub struct Observable<T> {
    source: Arc<dyn Subscribe<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Observable<T> {
        Observable { source: self.source.clone() }
    }
}

impl<T: 'static> Observable<T> {
    /// An observable running `producer` for every subscription.
    pub fn from_source<P: Producer<Item = T>>(producer: P) -> Observable<T> {
        Observable { source: Arc::new(producer) }
    }

    /// An observable backed by an arbitrary subscription entry point.
    pub fn from_subscribe(source: Arc<dyn Subscribe<T>>) -> Observable<T> {
        Observable { source }
    }

    /// Subscribe an observer.
    ///
    /// The observer is guarded: if it panics on a value, or once it has
    /// received a terminal notification, the subscription is torn down.
    pub fn subscribe(&self, observer: ObserverRef<T>) -> BoxDisposable {
        self.subscribe_raw(observer, true)
    }

    /// Subscribe an observer, choosing whether to guard it.
    ///
    /// Operators pass `false` when subscribing their own sinks upstream.
    pub fn subscribe_raw(&self, observer: ObserverRef<T>, enable_safeguard: bool) -> BoxDisposable {
        self.source.clone().subscribe_raw(observer, enable_safeguard)
    }

    /// Subscribe a closure handling values. Errors are logged.
    pub fn subscribe_fn<F>(&self, on_next: F) -> BoxDisposable
        where F: Fn(T) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(AnonymousObserver::new(on_next)))
    }


    /// A source that completes immediately.
    pub fn empty() -> Observable<T> {
        Observable::from_source(Empty::new())
    }

    /// A source that never notifies.
    pub fn never() -> Observable<T> {
        Observable::from_source(Never::new())
    }

    /// A source that fails immediately with `error`.
    pub fn throw(error: Error) -> Observable<T> {
        Observable::from_source(Throw::new(error))
    }

    /// A source defined by a subscribe closure.
    ///
    /// The closure gets an observer to push into and returns the handle that
    /// releases whatever it set up. Notifications violating the grammar, or
    /// pushed after the subscription was disposed, are dropped.
    ///
    /// ```
    /// # use reagent::{disposable, Observable, Observer};
    /// # use reagent::testing::Recorder;
    /// let source = Observable::<&str>::create(|observer| {
    ///     observer.on_next("hello");
    ///     observer.on_completed();
    ///     disposable::empty()
    /// });
    /// let recorder = Recorder::<&str>::new();
    /// source.subscribe(recorder.clone());
    /// assert_eq!(recorder.values(), vec!["hello"]);
    /// ```
    pub fn create<F>(subscribe: F) -> Observable<T>
        where F: Fn(ObserverRef<T>) -> BoxDisposable + Send + Sync + 'static,
    {
        Observable::from_source(Create::new(subscribe))
    }

    /// Emit the items of `iterable` on the current thread's trampoline.
    pub fn from_iter<I>(iterable: I) -> Observable<T>
        where I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
              I::IntoIter: Send + 'static,
    {
        Observable::from_iter_on(iterable, scheduler::current_thread())
    }

    /// Emit the items of `iterable` on `scheduler`.
    pub fn from_iter_on<I>(iterable: I, scheduler: Arc<dyn Scheduler>) -> Observable<T>
        where I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
              I::IntoIter: Send + 'static,
    {
        Observable::from_source(FromIter::new(iterable, scheduler))
    }


    /// Transform every value.
    pub fn map<U, F>(&self, selector: F) -> Observable<U>
        where U: 'static, F: Fn(T) -> U + Send + Sync + 'static,
    {
        Observable::from_source(Map::new(self.clone(), selector))
    }

    /// Transform every value with a fallible function. The first error
    /// fails the stream.
    pub fn try_map<U, F>(&self, selector: F) -> Observable<U>
        where U: 'static, F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        Observable::from_source(TryMap::new(self.clone(), selector))
    }

    /// Keep the values satisfying `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Observable<T>
        where F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Observable::from_source(Filter::new(self.clone(), predicate))
    }

    /// Mirror whichever of `self` and `other` notifies first.
    ///
    /// ```
    /// # use reagent::{Observable, Observer, Subject};
    /// # use reagent::testing::Recorder;
    /// let (slow, fast) = (Subject::<i32>::new(), Subject::<i32>::new());
    /// let recorder = Recorder::<i32>::new();
    /// slow.observable().amb(&fast.observable()).subscribe(recorder.clone());
    /// fast.on_next(1);
    /// slow.on_next(2);
    /// assert_eq!(recorder.values(), vec![1]);
    /// assert!(!slow.has_observers());
    /// ```
    pub fn amb(&self, other: &Observable<T>) -> Observable<T> {
        Observable::from_source(Amb::new(self.clone(), other.clone()))
    }

    /// Emit the number of values once the stream completes.
    pub fn count(&self) -> Observable<usize> {
        Observable::from_source(Count::new(self.clone()))
    }

    /// Emit whether the stream completes without a value.
    pub fn is_empty(&self) -> Observable<bool> {
        Observable::from_source(IsEmpty::new(self.clone()))
    }

    /// Emit whether any value satisfies `predicate`.
    pub fn any<F>(&self, predicate: F) -> Observable<bool>
        where F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Observable::from_source(Any::new(self.clone(), predicate))
    }

    /// Emit whether every value satisfies `predicate`.
    pub fn all<F>(&self, predicate: F) -> Observable<bool>
        where F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Observable::from_source(All::new(self.clone(), predicate))
    }

    /// Emit the first value, failing with [`Error::NoElements`] if there is
    /// none.
    pub fn first(&self) -> Observable<T> {
        Observable::from_source(First::new(self.clone()))
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// A source emitting `value`, then completing.
    pub fn just(value: T) -> Observable<T> {
        Observable::from_source(Just::new(value))
    }

    /// Emit `default` if the stream completes without a value.
    pub fn default_if_empty(&self, default: T) -> Observable<T> {
        Observable::from_source(DefaultIfEmpty::new(self.clone(), default))
    }
}

impl<T: PartialEq + Send + Sync + 'static> Observable<T> {
    /// Emit whether `value` occurs in the stream.
    pub fn contains(&self, value: T) -> Observable<bool> {
        self.any(move |x| *x == value)
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Emit all values as one `Vec` once the stream completes.
    pub fn to_vec(&self) -> Observable<Vec<T>> {
        Observable::from_source(ToVec::new(self.clone()))
    }
}

impl<T: Summand> Observable<T> {
    /// Emit the sum of all values once the stream completes. Integer
    /// overflow fails the stream with [`Error::Overflow`].
    pub fn sum(&self) -> Observable<T> {
        Observable::from_source(Sum::new(self.clone()))
    }
}
