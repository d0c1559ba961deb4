//! Racing two sources.

use std::sync::{Arc, Mutex};

use crate::disposable::{BinaryDisposable, BoxDisposable, Disposable, SingleAssignmentDisposable};
use crate::error::Error;
use crate::observable::Observable;
use crate::observer::{Observer, ObserverRef};
use crate::producer::Producer;
use crate::sink::{AsSink, Sink};
use crate::sync::lock;


/// Mirrors whichever of two sources notifies first.
///
/// Both sources are subscribed. The first notification of any kind, from
/// either side, decides the race: the other side's subscription is disposed
/// and everything it still delivers is dropped. The winner is forwarded
/// as is, including its terminal notification.
pub struct Amb<T> {
    left: Observable<T>,
    right: Observable<T>,
}

impl<T> Amb<T> {
    /// Race `left` against `right`.
    pub fn new(left: Observable<T>, right: Observable<T>) -> Amb<T> {
        Amb { left, right }
    }
}

impl<T: 'static> Producer for Amb<T> {
    type Item = T;
    type Sink = AmbSink<T>;

    fn create_sink(&self, observer: ObserverRef<T>) -> Arc<AmbSink<T>> {
        Arc::new(AmbSink {
            sink: Sink::new(observer),
            winner: Mutex::new(None),
            branches: Arc::new(BinaryDisposable::new()),
        })
    }

    fn run(&self, sink: &Arc<AmbSink<T>>) -> BoxDisposable {
        let left = self.left.subscribe_raw(Arc::new(AmbObserver::new(sink, Side::Left)), false);
        sink.assign(Side::Left, left);
        let right = self.right.subscribe_raw(Arc::new(AmbObserver::new(sink, Side::Right)), false);
        sink.assign(Side::Right, right);
        Box::new(sink.branches.clone())
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}


/// Per-subscription state of [`Amb`].
pub struct AmbSink<T> {
    sink: Sink<T>,
    winner: Mutex<Option<Side>>,
    branches: Arc<BinaryDisposable>,
}

impl<T: 'static> AmbSink<T> {
    fn slot(&self, side: Side) -> &SingleAssignmentDisposable {
        match side {
            Side::Left => self.branches.first(),
            Side::Right => self.branches.second(),
        }
    }

    fn assign(&self, side: Side, handle: BoxDisposable) {
        if let Err(error) = self.slot(side).assign(handle) {
            tracing::error!(%error, ?side, "amb branch assigned twice");
        }
    }

    /// Whether `side` may deliver. The first caller wins the race and
    /// disposes the loser.
    fn claim(&self, side: Side) -> bool {
        let decided = {
            let mut winner = lock(&self.winner);
            match *winner {
                Some(current) => return current == side,
                None => {
                    *winner = Some(side);
                    side
                },
            }
        };
        tracing::debug!(winner = ?decided, "amb race decided");
        self.slot(decided.other()).dispose();
        true
    }
}

impl<T: 'static> AsSink for AmbSink<T> {
    type Item = T;
    fn sink(&self) -> &Sink<T> { &self.sink }
}


/// Observes one side of the race on behalf of an [`AmbSink`].
struct AmbObserver<T> {
    parent: Arc<AmbSink<T>>,
    side: Side,
}

impl<T> AmbObserver<T> {
    fn new(parent: &Arc<AmbSink<T>>, side: Side) -> AmbObserver<T> {
        AmbObserver { parent: parent.clone(), side }
    }
}

impl<T: 'static> Observer<T> for AmbObserver<T> {
    fn on_next(&self, value: T) {
        if self.parent.claim(self.side) {
            self.parent.sink.forward_on_next(value);
        }
    }

    fn on_error(&self, error: Error) {
        if self.parent.claim(self.side) {
            self.parent.sink.forward_on_error(error);
        }
    }

    fn on_completed(&self) {
        if self.parent.claim(self.side) {
            self.parent.sink.forward_on_completed();
        }
    }
}


#[cfg(test)]
mod test {
    use crate::disposable::Disposable;
    use crate::error::Error;
    use crate::observable::Observable;
    use crate::observer::{Notification, Observer};
    use crate::subject::Subject;
    use crate::testing::Recorder;

    #[test]
    fn first_to_notify_wins() {
        let (left, right) = (Subject::<i32>::new(), Subject::<i32>::new());
        let recorder = Recorder::<i32>::new();
        left.observable().amb(&right.observable()).subscribe(recorder.clone());
        assert!(left.has_observers() && right.has_observers());
        right.on_next(2);
        assert!(!left.has_observers());
        left.on_next(1);
        right.on_next(3);
        right.on_completed();
        assert_eq!(recorder.notifications(), vec![
            Notification::Next(2),
            Notification::Next(3),
            Notification::Completed,
        ]);
        assert!(!right.has_observers());
    }

    #[test]
    fn terminal_can_win() {
        let (left, right) = (Subject::<i32>::new(), Subject::<i32>::new());
        let recorder = Recorder::<i32>::new();
        left.observable().amb(&right.observable()).subscribe(recorder.clone());
        left.on_error(Error::NoElements);
        right.on_next(1);
        assert_eq!(recorder.notifications(), vec![Notification::Error(Error::NoElements)]);
        assert!(!left.has_observers() && !right.has_observers());
    }

    #[test]
    fn synchronous_left_side_wins_before_right_subscribes() {
        let right = Subject::<i32>::new();
        let recorder = Recorder::<i32>::new();
        Observable::just(1).amb(&right.observable()).subscribe(recorder.clone());
        assert_eq!(recorder.notifications(), vec![Notification::Next(1), Notification::Completed]);
        assert!(!right.has_observers());
    }

    #[test]
    fn dispose_releases_both_sides() {
        let (left, right) = (Subject::<i32>::new(), Subject::<i32>::new());
        let recorder = Recorder::<i32>::new();
        let handle = left.observable().amb(&right.observable()).subscribe(recorder.clone());
        handle.dispose();
        assert!(!left.has_observers() && !right.has_observers());
        left.on_next(1);
        assert!(recorder.is_empty());
    }

    #[test]
    fn nested_amb_subscribes_without_recursion() {
        let mut source = Observable::<i32>::never();
        for _ in 0..1_000 {
            source = source.amb(&Observable::never());
        }
        let source = source.amb(&Observable::just(9));
        let recorder = Recorder::<i32>::new();
        source.subscribe(recorder.clone());
        assert_eq!(recorder.values(), vec![9]);
        assert!(recorder.is_completed());
    }
}
