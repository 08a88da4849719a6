//! Cooperative-RTOS mutex backend: a spinlock.
//!
//! Cooperative tasks don't preempt each other arbitrarily, but more than one
//! task may still call into the bus between voluntary yield points (e.g. an
//! ISR publishing while a task is mid-read), so a true no-op mutex is not
//! safe here. A short busy-wait spinlock is: critical sections in this crate
//! are a handful of integer operations plus one `size_of::<T>()` copy, so the
//! spin is always bounded and brief.

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

/// A spinlock-backed mutex around `T`.
pub struct Mutex<T> {
    locked: AtomicBool,
    inner: UnsafeCell<T>,
}

impl<T> Mutex<T> {
    /// Construct a new mutex wrapping `value`.
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            inner: UnsafeCell::new(value),
        }
    }

    /// Acquire the lock, spinning until it is free.
    #[inline]
    pub fn lock(&self) -> Guard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        Guard { mtx: self }
    }

    /// Attempt to acquire the lock without spinning.
    #[inline]
    pub fn try_lock(&self) -> Option<Guard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Guard { mtx: self })
    }
}

unsafe impl<T: Send> Send for Mutex<T> {}
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

impl<'a, T> Drop for Guard<'a, T> {
    fn drop(&mut self) {
        self.mtx.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn mutual_exclusion_across_threads() {
        let mtx = Arc::new(Mutex::new(0u64));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let mtx = mtx.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    *mtx.lock() += 1;
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*mtx.lock(), 8000);
    }
}
