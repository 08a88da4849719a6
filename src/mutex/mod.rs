//! Platform-portable locking backend.
//!
//! Exactly one of `platform-posix`, `platform-baremetal`, `platform-rtos`
//! is selected at build time (enforced by `build.rs`); each provides a
//! [`Mutex<T>`] with the same `new`/`lock` surface so [`crate::topic::Topic`]
//! and [`crate::registry::TopicRegistry`] don't need to know which backend
//! is underneath.

#[cfg(feature = "platform-posix")]
mod posix;
#[cfg(feature = "platform-posix")]
pub use posix::Mutex;

#[cfg(feature = "platform-baremetal")]
mod baremetal;
#[cfg(feature = "platform-baremetal")]
pub use baremetal::Mutex;

#[cfg(feature = "platform-rtos")]
mod rtos;
#[cfg(feature = "platform-rtos")]
pub use rtos::Mutex;
