//! Lock helpers.

use std::sync::{Mutex, MutexGuard, PoisonError};


/// Lock a mutex, recovering the guard if a panicking user callback poisoned
/// it.
///
/// The engine never calls out to observers or disposables while holding one
/// of its own locks, so the protected state is consistent even when poisoned.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
