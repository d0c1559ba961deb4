//! The subscription entry point shared by every operator.

use std::sync::Arc;

use crate::disposable::{BoxDisposable, Disposable};
use crate::drop::on_unwind;
use crate::observer::ObserverRef;
use crate::safe_observer::SafeObserver;
use crate::scheduler::current_thread;
use crate::sink::{AsSink, SinkHandle};


/// Something that can be subscribed to.
///
/// This is the object-safe surface behind [`Observable`](crate::Observable).
/// Operators implement [`Producer`] instead and get this trait for free.
pub trait Subscribe<T>: Send + Sync {
    /// Subscribe `observer`, returning the handle that cancels the
    /// subscription.
    ///
    /// With `enable_safeguard` the observer is wrapped in a
    /// [`SafeObserver`]. Operators subscribing to their own sources pass
    /// `false`, as their sinks already enforce the grammar.
    fn subscribe_raw(self: Arc<Self>, observer: ObserverRef<T>, enable_safeguard: bool)
        -> BoxDisposable;
}


/// An operator: a recipe for per-subscription sinks.
///
/// Subscribing creates a sink bound to the downstream observer, then calls
/// `run` to connect the sink to whatever feeds it. The handle `run` returns
/// is stored in the sink, so a terminal notification or a dispose of the
/// subscription releases it.
///
/// `run` is always executed on the current thread's trampoline: if a
/// subscription is made while the trampoline is draining, for instance from
/// within another operator's `run`, it is deferred until that `run` has
/// returned. Composed operators therefore subscribe iteratively, not
/// recursively.
///
/// Only subscription is flattened this way. Notifications travel through
/// one sink per operator on the native stack, so a value emitted
/// synchronously at the bottom of a deeply composed chain still needs stack
/// proportional to the depth of the chain.
///
/// If `run` panics, the sink is disposed before the panic propagates, and
/// so is the outermost subscription of the trampoline drain it was part of.
pub trait Producer: Send + Sync + Sized + 'static {
    /// Values delivered downstream.
    type Item: 'static;

    /// Per-subscription state.
    type Sink: AsSink<Item = Self::Item> + Send + Sync + 'static;

    /// Build the sink for one subscription.
    fn create_sink(&self, observer: ObserverRef<Self::Item>) -> Arc<Self::Sink>;

    /// Connect `sink` to its upstream, returning the upstream handle.
    fn run(&self, sink: &Arc<Self::Sink>) -> BoxDisposable;
}

impl<P: Producer> Subscribe<P::Item> for P {
    fn subscribe_raw(self: Arc<Self>, observer: ObserverRef<P::Item>, enable_safeguard: bool)
        -> BoxDisposable
    {
        subscribe(self, observer, enable_safeguard)
    }
}


/// State handed from `subscribe` to the deferred `run`.
struct Handshake<P: Producer> {
    producer: Arc<P>,
    sink: Arc<P::Sink>,
}

impl<P: Producer> Handshake<P> {
    fn run(self) {
        let sink = self.sink.sink();
        if sink.is_disposed() {
            tracing::trace!("subscription disposed before it ran");
            return;
        }
        let upstream = {
            let _teardown = on_unwind(|| sink.dispose());
            self.producer.run(&self.sink)
        };
        match sink.set_upstream(upstream) {
            Ok(true) => (),
            Ok(false) => tracing::trace!("sink terminated before its upstream handle arrived"),
            Err(error) => tracing::error!(%error, "upstream handle assigned twice"),
        }
    }
}

fn subscribe<P: Producer>(producer: Arc<P>, observer: ObserverRef<P::Item>, enable_safeguard: bool)
    -> BoxDisposable
{
    let safeguard = if enable_safeguard {
        Some(SafeObserver::wrap(observer.clone()))
    } else {
        None
    };
    let observer = match &safeguard {
        Some(safe) => safe.clone() as ObserverRef<P::Item>,
        None => observer,
    };
    let sink = producer.create_sink(observer);
    if let Some(safe) = safeguard {
        // The safeguard is fresh, so its slot cannot be taken yet.
        let _ = safe.set_resource(Box::new(SinkHandle::new(sink.clone())));
    }
    if current_thread::is_active() {
        tracing::trace!("trampoline active, deferring run");
    }
    // Only the outermost call drains the queue, so only it can unwind here.
    let _teardown = {
        let sink = sink.clone();
        on_unwind(move || sink.sink().dispose())
    };
    let handshake = Handshake { producer, sink: sink.clone() };
    current_thread::trampoline(move || handshake.run());
    Box::new(SinkHandle::new(sink))
}
