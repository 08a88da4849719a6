//! POSIX / hosted-thread mutex backend, built on `parking_lot`.
//!
//! `parking_lot::Mutex` is already the locking primitive the rest of this
//! corpus reaches for on hosted builds; it is smaller and faster than
//! `std::sync::Mutex` and never gets poisoned, which suits a bus that must
//! never abort a publisher because some past reader panicked.

pub use parking_lot::MutexGuard as Guard;

/// A mutex around `T`, backed by `parking_lot` on hosted POSIX builds.
pub struct Mutex<T> {
    inner: parking_lot::Mutex<T>,
}

impl<T> Mutex<T> {
    /// Construct a new mutex wrapping `value`.
    pub const fn new(value: T) -> Self {
        Self {
            inner: parking_lot::Mutex::new(value),
        }
    }

    /// Acquire the lock, blocking the calling thread until it is available.
    #[inline]
    pub fn lock(&self) -> Guard<'_, T> {
        self.inner.lock()
    }

    /// Attempt to acquire the lock without blocking.
    #[inline]
    pub fn try_lock(&self) -> Option<Guard<'_, T>> {
        self.inner.try_lock()
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
