//! In-memory stores for users and tasks.
//!
//! Each store owns its collection behind one `Mutex` and holds it for the whole of
//! every operation, reads included. The two stores lock independently.

pub mod task_store;
pub mod user_store;

pub use task_store::TaskStore;
pub use user_store::UserStore;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Acquires a store's critical section.
///
/// Stores apply each mutation in a single step after all fallible work, so a
/// guard poisoned by a panicking caller still covers consistent state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
