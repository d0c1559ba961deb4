//! Outermost guard around user observers.

use std::sync::Arc;

use crate::disposable::{Assignment, BoxDisposable, Disposable, SingleAssignmentDisposable};
use crate::drop::{defer, on_unwind};
use crate::error::{Error, Result};
use crate::observer::{Observer, ObserverRef};


/// Wraps a user-supplied observer at the outermost subscription boundary.
///
/// If the observer panics while handling a value, the subscription is torn
/// down before the panic leaves `on_next`. Terminal notifications always
/// tear the subscription down on the way out, whether the handler returns or
/// panics. Panics are never swallowed; they reach whoever delivered the
/// notification.
///
/// Internal links between operators skip this wrapper: their sinks already
/// enforce the grammar.
pub struct SafeObserver<T> {
    observer: ObserverRef<T>,
    resource: SingleAssignmentDisposable,
}

impl<T: 'static> SafeObserver<T> {
    /// Wrap `observer`. The subscription to tear down is supplied later with
    /// [`set_resource`](SafeObserver::set_resource), once it exists.
    pub fn wrap(observer: ObserverRef<T>) -> Arc<SafeObserver<T>> {
        Arc::new(SafeObserver {
            observer,
            resource: SingleAssignmentDisposable::new(),
        })
    }

    /// Hand over the subscription this observer tears down. Returns
    /// `Ok(false)` if the observer had already terminated, in which case the
    /// resource was disposed on arrival.
    pub fn set_resource(&self, resource: BoxDisposable) -> Result<bool> {
        self.resource.assign(resource).map(|assignment| assignment == Assignment::Stored)
    }
}

impl<T: 'static> Observer<T> for SafeObserver<T> {
    fn on_next(&self, value: T) {
        let _guard = on_unwind(|| self.resource.dispose());
        self.observer.on_next(value);
    }

    fn on_error(&self, error: Error) {
        let _teardown = defer(|| self.resource.dispose());
        self.observer.on_error(error);
    }

    fn on_completed(&self) {
        let _teardown = defer(|| self.resource.dispose());
        self.observer.on_completed();
    }
}

impl<T> Disposable for SafeObserver<T> {
    fn dispose(&self) {
        self.resource.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.resource.is_disposed()
    }
}


#[cfg(test)]
mod test {
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Arc;

    use crate::observer::AnonymousObserver;
    use crate::testing::{CountingDisposable, Recorder};
    use super::*;

    #[test]
    fn forwards_values_without_teardown() {
        let recorder = Recorder::<i32>::new();
        let safe = SafeObserver::wrap(recorder.clone());
        let resource = CountingDisposable::new();
        safe.set_resource(Box::new(resource.clone())).unwrap();
        safe.on_next(1);
        safe.on_next(2);
        assert_eq!(recorder.values(), vec![1, 2]);
        assert_eq!(resource.count(), 0);
    }

    #[test]
    fn panicking_value_handler_tears_down_and_propagates() {
        let observer = AnonymousObserver::new(|_: i32| panic!("bad observer"));
        let safe = SafeObserver::wrap(Arc::new(observer));
        let resource = CountingDisposable::new();
        safe.set_resource(Box::new(resource.clone())).unwrap();
        let result = catch_unwind(AssertUnwindSafe(|| safe.on_next(1)));
        assert!(result.is_err());
        assert_eq!(resource.count(), 1);
    }

    #[test]
    fn terminal_always_tears_down() {
        let recorder = Recorder::<i32>::new();
        let safe = SafeObserver::wrap(recorder.clone());
        let resource = CountingDisposable::new();
        safe.set_resource(Box::new(resource.clone())).unwrap();
        safe.on_error(Error::Overflow);
        assert_eq!(recorder.error(), Some(Error::Overflow));
        assert_eq!(resource.count(), 1);
        assert!(safe.is_disposed());
    }

    #[test]
    fn panicking_terminal_handler_still_tears_down() {
        let observer = AnonymousObserver::new(|_: i32| ())
            .with_completed(|| panic!("bad observer"));
        let safe = SafeObserver::wrap(Arc::new(observer));
        let resource = CountingDisposable::new();
        safe.set_resource(Box::new(resource.clone())).unwrap();
        let result = catch_unwind(AssertUnwindSafe(|| safe.on_completed()));
        assert!(result.is_err());
        assert_eq!(resource.count(), 1);
    }

    #[test]
    fn resource_after_termination_is_disposed() {
        let recorder = Recorder::<i32>::new();
        let safe = SafeObserver::wrap(recorder.clone());
        safe.on_completed();
        let resource = CountingDisposable::new();
        assert_eq!(safe.set_resource(Box::new(resource.clone())), Ok(false));
        assert_eq!(resource.count(), 1);
    }
}
