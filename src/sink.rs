//! Per-subscription state enforcing the observer grammar.

use std::mem;
use std::sync::{Arc, Mutex};

use crate::disposable::{Assignment, BoxDisposable, Disposable, SingleAssignmentDisposable};
use crate::drop::defer;
use crate::error::{Error, Result};
use crate::observer::{NopObserver, Observer, ObserverRef};
use crate::sync::lock;


/// The bridge between one subscription's upstream and its downstream
/// observer.
///
/// A sink owns the downstream observer and the cancellation handle of
/// whatever the operator subscribed to. Forwarding a terminal notification
/// retargets the downstream to a [`NopObserver`] before delivering it and
/// disposes the upstream afterwards, so each sink forwards at most one
/// terminal notification and anything arriving later is dropped. External
/// disposal performs the same teardown without notifying downstream.
///
/// Operators embed a `Sink` in their own sink type and expose it through
/// [`AsSink`].
pub struct Sink<T> {
    downstream: Mutex<ObserverRef<T>>,
    upstream: SingleAssignmentDisposable,
}

impl<T: 'static> Sink<T> {
    /// Create a sink forwarding to `observer`.
    pub fn new(observer: ObserverRef<T>) -> Sink<T> {
        Sink {
            downstream: Mutex::new(observer),
            upstream: SingleAssignmentDisposable::new(),
        }
    }

    /// Store the handle of the upstream subscription.
    ///
    /// Returns `Ok(true)` if the sink now owns the handle, or `Ok(false)` if
    /// the sink was already torn down, in which case the handle has been
    /// disposed. The latter happens when the upstream terminated
    /// synchronously, before its subscribe call returned the handle.
    pub fn set_upstream(&self, handle: BoxDisposable) -> Result<bool> {
        self.upstream.assign(handle).map(|assignment| assignment == Assignment::Stored)
    }

    /// Deliver a value downstream.
    pub fn forward_on_next(&self, value: T) {
        let downstream = lock(&self.downstream).clone();
        downstream.on_next(value);
    }

    /// Deliver an error downstream and tear the subscription down.
    pub fn forward_on_error(&self, error: Error) {
        let downstream = self.retarget();
        let _teardown = defer(|| self.upstream.dispose());
        downstream.on_error(error);
    }

    /// Deliver completion downstream and tear the subscription down.
    pub fn forward_on_completed(&self) {
        let downstream = self.retarget();
        let _teardown = defer(|| self.upstream.dispose());
        downstream.on_completed();
    }

    /// Whether the sink was disposed or has forwarded a terminal
    /// notification.
    pub fn is_disposed(&self) -> bool {
        self.upstream.is_disposed()
    }

    /// Swap in the no-op observer, returning the previous downstream.
    fn retarget(&self) -> ObserverRef<T> {
        let nop: ObserverRef<T> = Arc::new(NopObserver);
        mem::replace(&mut *lock(&self.downstream), nop)
    }
}

impl<T: 'static> Disposable for Sink<T> {
    fn dispose(&self) {
        tracing::trace!("sink disposed");
        drop(self.retarget());
        self.upstream.dispose();
    }

    fn is_disposed(&self) -> bool {
        Sink::is_disposed(self)
    }
}

/// A sink is itself an observer that forwards everything downstream. This is
/// what a pass-through operator subscribes upstream with.
impl<T: 'static> Observer<T> for Sink<T> {
    fn on_next(&self, value: T) { self.forward_on_next(value) }
    fn on_error(&self, error: Error) { self.forward_on_error(error) }
    fn on_completed(&self) { self.forward_on_completed() }
}


/// Access to the [`Sink`] embedded in an operator's sink.
pub trait AsSink {
    /// Type of the values delivered downstream.
    type Item: 'static;

    /// The embedded sink.
    fn sink(&self) -> &Sink<Self::Item>;
}

impl<T: 'static> AsSink for Sink<T> {
    type Item = T;

    fn sink(&self) -> &Sink<T> { self }
}


/// The externally visible handle of a subscription: disposing it disposes the
/// operator's sink.
pub struct SinkHandle<S> {
    sink: Arc<S>,
}

impl<S> SinkHandle<S> {
    /// Wrap a shared operator sink.
    pub fn new(sink: Arc<S>) -> SinkHandle<S> {
        SinkHandle { sink }
    }
}

impl<S: AsSink + Send + Sync> Disposable for SinkHandle<S> {
    fn dispose(&self) { self.sink.sink().dispose() }
    fn is_disposed(&self) -> bool { self.sink.sink().is_disposed() }
}
