//! Hot, multicast sources.
//!
//! A subject is both an observer and an observable: every notification pushed
//! into it is fanned out to its current subscribers. It is the bridge from
//! imperative code, running on any thread, into a pipeline.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::disposable::{self, BoxDisposable, Disposable};
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Subscribe;
use crate::safe_observer::SafeObserver;
use crate::sync::lock;


#[derive(Clone)]
enum Terminal {
    Error(Error),
    Completed,
}

impl Terminal {
    fn deliver<T>(self, observer: &dyn Observer<T>) {
        match self {
            Terminal::Error(error) => observer.on_error(error),
            Terminal::Completed => observer.on_completed(),
        }
    }
}

struct State<T> {
    observers: Vec<(u64, ObserverRef<T>)>,
    next_id: u64,
    terminal: Option<Terminal>,
}

struct Core<T> {
    state: Mutex<State<T>>,
}


/// A multicast source fed by hand.
///
/// Values are delivered to the observers subscribed at the time of the call.
/// Once terminated, a subject ignores further notifications and hands the
/// terminal notification to anyone subscribing later.
///
/// ```
/// # use reagent::{Disposable, Observer, Subject};
/// use std::sync::{Arc, Mutex};
///
/// let subject = Subject::<i32>::new();
/// let seen = Arc::new(Mutex::new(vec![]));
/// let handle = {
///     let seen = seen.clone();
///     subject.observable().subscribe_fn(move |x: i32| seen.lock().unwrap().push(x))
/// };
/// subject.on_next(1);
/// handle.dispose();
/// subject.on_next(2);
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
pub struct Subject<T> {
    core: Arc<Core<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Subject<T> {
        Subject { core: self.core.clone() }
    }
}

impl<T: Clone + 'static> Default for Subject<T> {
    fn default() -> Subject<T> {
        Subject::new()
    }
}

impl<T: Clone + 'static> Subject<T> {
    /// Create a subject without subscribers.
    pub fn new() -> Subject<T> {
        let state = State { observers: vec![], next_id: 0, terminal: None };
        Subject { core: Arc::new(Core { state: Mutex::new(state) }) }
    }

    /// The stream of notifications pushed into this subject.
    pub fn observable(&self) -> Observable<T> {
        Observable::from_subscribe(self.core.clone())
    }

    /// Whether anyone is currently subscribed.
    pub fn has_observers(&self) -> bool {
        !lock(&self.core.state).observers.is_empty()
    }

    /// Snapshot the observers, unless terminated.
    fn observers(&self) -> Vec<ObserverRef<T>> {
        let state = lock(&self.core.state);
        if state.terminal.is_some() {
            return vec![];
        }
        state.observers.iter().map(|(_, observer)| observer.clone()).collect()
    }

    /// Record the terminal notification and take the observers to deliver
    /// it to. Only the first call gets any.
    fn terminate(&self, terminal: Terminal) -> Vec<ObserverRef<T>> {
        let mut state = lock(&self.core.state);
        if state.terminal.is_some() {
            return vec![];
        }
        state.terminal = Some(terminal);
        mem::replace(&mut state.observers, vec![])
            .into_iter()
            .map(|(_, observer)| observer)
            .collect()
    }
}

impl<T: Clone + 'static> Observer<T> for Subject<T> {
    fn on_next(&self, value: T) {
        let observers = self.observers();
        if let Some((last, rest)) = observers.split_last() {
            for observer in rest {
                observer.on_next(value.clone());
            }
            last.on_next(value);
        }
    }

    fn on_error(&self, error: Error) {
        for observer in self.terminate(Terminal::Error(error.clone())) {
            observer.on_error(error.clone());
        }
    }

    fn on_completed(&self) {
        for observer in self.terminate(Terminal::Completed) {
            observer.on_completed();
        }
    }
}


impl<T: 'static> Subscribe<T> for Core<T> {
    fn subscribe_raw(self: Arc<Self>, observer: ObserverRef<T>, enable_safeguard: bool)
        -> BoxDisposable
    {
        let safeguard = if enable_safeguard {
            Some(SafeObserver::wrap(observer.clone()))
        } else {
            None
        };
        let observer = match &safeguard {
            Some(safe) => safe.clone() as ObserverRef<T>,
            None => observer,
        };
        let registered = {
            let mut state = lock(&self.state);
            match &state.terminal {
                Some(terminal) => Err(terminal.clone()),
                None => {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.observers.push((id, observer.clone()));
                    Ok(id)
                },
            }
        };
        match registered {
            Ok(id) => {
                let subscription = Arc::new(SubjectSubscription {
                    core: Arc::downgrade(&self),
                    id,
                    disposed: AtomicBool::new(false),
                });
                if let Some(safe) = safeguard {
                    let _ = safe.set_resource(Box::new(subscription.clone()));
                }
                Box::new(subscription)
            },
            Err(terminal) => {
                tracing::trace!("late subscriber to a terminated subject");
                terminal.deliver(&*observer);
                disposable::empty()
            },
        }
    }
}


/// Removes one observer from a subject.
struct SubjectSubscription<T> {
    core: Weak<Core<T>>,
    id: u64,
    disposed: AtomicBool,
}

impl<T> Disposable for SubjectSubscription<T> {
    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(core) = self.core.upgrade() {
            let removed = {
                let mut state = lock(&core.state);
                let id = self.id;
                state.observers.iter()
                    .position(|(other, _)| *other == id)
                    .map(|index| state.observers.remove(index))
            };
            drop(removed);
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
