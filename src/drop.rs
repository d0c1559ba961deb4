//! Scope guards running cleanup on exit.

use std::thread;


/// Runs a closure when dropped.
pub struct Defer<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// Run `action` when the returned guard goes out of scope, whether the scope
/// is left normally or by unwinding.
pub fn defer<F: FnOnce()>(action: F) -> Defer<F> {
    Defer { action: Some(action) }
}


/// Runs a closure when dropped during a panic.
pub struct OnUnwind<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Drop for OnUnwind<F> {
    fn drop(&mut self) {
        if thread::panicking() {
            if let Some(action) = self.action.take() {
                action();
            }
        }
    }
}

/// Run `action` only if the scope guarded by the returned value unwinds.
pub fn on_unwind<F: FnOnce()>(action: F) -> OnUnwind<F> {
    OnUnwind { action: Some(action) }
}


#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use super::*;

    #[test]
    fn defer_runs_on_normal_exit() {
        let ran = Cell::new(false);
        {
            let _guard = defer(|| ran.set(true));
        }
        assert!(ran.get());
    }

    #[test]
    fn defer_runs_on_unwind() {
        let ran = Cell::new(false);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = defer(|| ran.set(true));
            panic!("handler failed");
        }));
        assert!(result.is_err());
        assert!(ran.get());
    }

    #[test]
    fn on_unwind_skips_normal_exit() {
        let ran = Cell::new(false);
        {
            let _guard = on_unwind(|| ran.set(true));
        }
        assert!(!ran.get());
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = on_unwind(|| ran.set(true));
            panic!("handler failed");
        }));
        assert!(ran.get());
    }
}
