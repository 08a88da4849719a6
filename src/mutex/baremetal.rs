//! Bare-metal mutex backend: a no-op lock.
//!
//! There is no scheduler to contend with on a single-threaded bare-metal
//! target, so `lock()` never blocks. This is only sound if the caller has
//! either disabled interrupts around the critical section or genuinely runs
//! single-threaded with no reentrant ISR access to the bus — the same
//! assumption the source's bare-metal mutex makes.

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};

/// A mutex around `T` that never actually blocks.
pub struct Mutex<T> {
    inner: UnsafeCell<T>,
}

impl<T> Mutex<T> {
    /// Construct a new mutex wrapping `value`.
    pub const fn new(value: T) -> Self {
        Self {
            inner: UnsafeCell::new(value),
        }
    }

    /// "Acquire" the lock. Never blocks; always succeeds immediately.
    #[inline]
    pub fn lock(&self) -> Guard<'_, T> {
        Guard { mtx: self }
    }

    /// Attempt to acquire the lock. Always succeeds.
    #[inline]
    pub fn try_lock(&self) -> Option<Guard<'_, T>> {
        Some(self.lock())
    }
}

// Safety: sound only under the caller's single-threaded-or-interrupts-disabled
// assumption documented above. The bus never spawns threads of its own.
unsafe impl<T: Send> Sync for Mutex<T> {}

/// RAII guard returned by [`Mutex::lock`].
pub struct Guard<'a, T> {
    mtx: &'a Mutex<T>,
}

impl<'a, T> Deref for Guard<'a, T> {
    type Target = T;
    fn deref(&self) -> &T {
        unsafe { &*self.mtx.inner.get() }
    }
}

impl<'a, T> DerefMut for Guard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.mtx.inner.get() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_threaded_access() {
        let mtx = Mutex::new(0u64);
        *mtx.lock() += 1;
        *mtx.lock() += 1;
        assert_eq!(*mtx.lock(), 2);
    }
}
