//! A push-based observable stream engine
//!
//! *Reagent* provides the subscription machinery that reactive operators are
//! built on. It is modelled after the [Reactive
//! Extensions](http://reactivex.io): an `Observable` is a recipe for a stream
//! of notifications, and subscribing an `Observer` to it runs the recipe,
//! returning a handle that cancels the subscription.
//!
//! Every stream obeys the observer grammar: any number of values followed by
//! at most one terminal notification, an error or a completion. The engine
//! enforces it, so an operator never needs to check whether its downstream
//! has already terminated, and a terminal notification or a dispose releases
//! every resource of a subscription exactly once.
//!
//!
//! # Building blocks
//!
//! The engine consists of a few small pieces:
//!
//! - *Disposables* are idempotent, thread-safe cancellation handles. The
//!   `disposable` module provides single-assignment slots, pairs and
//!   collections of them.
//! - A *sink* is the per-subscription state of an operator. It owns the
//!   downstream observer and the upstream handle, and tears both down on the
//!   first terminal notification.
//! - A *safe observer* guards user code at the end of a pipeline, so that a
//!   panicking handler releases its subscription.
//! - A *producer* is an operator: a recipe for sinks. Subscriptions run on
//!   the current thread's trampoline, which keeps subscribing flat however
//!   deeply operators are composed. Delivery is not flattened: each
//!   notification passes through every operator on the native stack.
//!
//!
//! # Example
//!
//! ```
//! use reagent::{Disposable, Notification, Observer, Subject};
//! use reagent::testing::Recorder;
//!
//! // A subject is a source you push values into by hand
//! let subject = Subject::<i32>::new();
//!
//! // Derive a stream telling whether the subject is empty
//! let recorder = Recorder::<bool>::new();
//! let subscription = subject.observable().is_empty().subscribe(recorder.clone());
//! assert!(subject.has_observers());
//!
//! // The first value settles the question and releases the subject
//! subject.on_next(42);
//! assert_eq!(
//!     recorder.notifications(),
//!     vec![Notification::Next(false), Notification::Completed]
//! );
//! assert!(!subject.has_observers());
//! assert!(subscription.is_disposed());
//! ```
//!
//! All types are `Send + Sync`. Subjects may be fed from any thread, and a
//! subscription may be disposed from a different thread than the one
//! delivering its notifications.
//!
//! Handler panics are the failure mode of user code: they propagate to
//! whoever delivered the notification, but only after the subscription was
//! torn down.

#![warn(missing_docs)]

pub mod disposable;
pub mod drop;
pub mod error;
pub mod observable;
pub mod observer;
pub mod operators;
pub mod producer;
pub mod safe_observer;
pub mod scheduler;
pub mod sink;
pub mod source;
pub mod subject;
mod sync;
pub mod testing;

pub use crate::disposable::{BoxDisposable, Disposable};
pub use crate::error::{Error, Result};
pub use crate::observable::Observable;
pub use crate::observer::{AnonymousObserver, Notification, Observer, ObserverRef};
pub use crate::producer::{Producer, Subscribe};
pub use crate::safe_observer::SafeObserver;
pub use crate::scheduler::Scheduler;
pub use crate::sink::{AsSink, Sink};
pub use crate::subject::Subject;
