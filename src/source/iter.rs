//! Sources draining an iterator.

use std::sync::Arc;

use crate::disposable::{BoxDisposable, BooleanDisposable, Disposable};
use crate::observer::ObserverRef;
use crate::producer::Producer;
use crate::scheduler::Scheduler;
use crate::sink::Sink;


/// Emits every item of an iterable, then completes.
///
/// The iterable is cloned for every subscription. If the scheduler offers the
/// long-running capability the items are emitted from a single loop,
/// otherwise each item is scheduled as its own action. Either way emission
/// stops as soon as the subscription is disposed.
pub struct FromIter<I> {
    iterable: I,
    scheduler: Arc<dyn Scheduler>,
}

impl<I> FromIter<I> {
    /// Emit the items of `iterable` on `scheduler`.
    pub fn new(iterable: I, scheduler: Arc<dyn Scheduler>) -> FromIter<I> {
        FromIter { iterable, scheduler }
    }
}

impl<I> Producer for FromIter<I>
    where I: IntoIterator + Clone + Send + Sync + 'static,
          I::IntoIter: Send + 'static,
          I::Item: 'static,
{
    type Item = I::Item;
    type Sink = Sink<I::Item>;

    fn create_sink(&self, observer: ObserverRef<I::Item>) -> Arc<Sink<I::Item>> {
        Arc::new(Sink::new(observer))
    }

    fn run(&self, sink: &Arc<Sink<I::Item>>) -> BoxDisposable {
        let iter = self.iterable.clone().into_iter();
        let sink = sink.clone();
        match self.scheduler.as_long_running() {
            Some(long_running) => long_running.schedule_long_running(Box::new(
                move |cancel: &BooleanDisposable| drain(iter, &sink, cancel)
            )),
            None => {
                let cancel = Arc::new(BooleanDisposable::new());
                let scheduler = self.scheduler.clone();
                let handle = cancel.clone();
                self.scheduler.schedule(Box::new(move || step(iter, sink, scheduler, cancel)));
                Box::new(handle)
            },
        }
    }
}

fn drain<I>(iter: I, sink: &Sink<I::Item>, cancel: &BooleanDisposable)
    where I: Iterator, I::Item: 'static,
{
    for item in iter {
        if cancel.is_disposed() || sink.is_disposed() {
            tracing::trace!("iteration cancelled");
            return;
        }
        sink.forward_on_next(item);
    }
    sink.forward_on_completed();
}

/// Emit one item and schedule the next.
fn step<I>(mut iter: I, sink: Arc<Sink<I::Item>>, scheduler: Arc<dyn Scheduler>,
           cancel: Arc<BooleanDisposable>)
    where I: Iterator + Send + 'static, I::Item: 'static,
{
    if cancel.is_disposed() || sink.is_disposed() {
        tracing::trace!("iteration cancelled");
        return;
    }
    match iter.next() {
        Some(item) => {
            sink.forward_on_next(item);
            let next = scheduler.clone();
            // The cancel flag covers the pending step, so its own handle is
            // not kept.
            scheduler.schedule(Box::new(move || step(iter, sink, next, cancel)));
        },
        None => sink.forward_on_completed(),
    }
}
