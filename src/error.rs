//! Error types for the bus's configuration-class failures.
//!
//! Hot-path operations (`publish`, `read`, `check`, `subscribe`) keep the
//! `Option`/`bool` return shapes fixed by the operation contracts; `BusError`
//! exists only for the handful of calls that are naturally fallible at the
//! call site: topic registration and the checked publish path.

use thiserror::Error;

/// Result type alias for bus configuration operations.
pub type Result<T> = std::result::Result<T, BusError>;

/// Fatal/configuration-class errors surfaced by the registry and topic setup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The registry has no free slots left for a new topic.
    #[error("topic registry is full")]
    RegistryFull,

    /// A topic with this `message_id` is already registered.
    #[error("topic already registered")]
    DuplicateTopic,

    /// The caller's `size_of::<T>()` disagrees with the registered descriptor.
    #[error("payload size mismatch: expected {expected}, got {actual}")]
    PayloadSizeMismatch {
        /// Size recorded on the topic's metadata descriptor.
        expected: usize,
        /// Size of the type the caller tried to use.
        actual: usize,
    },

    /// The descriptor passed to a top-level call has no registered topic.
    #[error("unknown topic")]
    UnknownTopic,

    /// The topic's subscriber table has no free slot.
    #[error("no free subscriber slot")]
    NoSlot,

    /// A `SchemaCodec` failed to encode or decode a payload.
    #[cfg(feature = "schema-serde")]
    #[error("schema codec failed")]
    CodecFailed,
}

impl BusError {
    /// Configuration-class errors mean the program is misconfigured and
    /// should not be retried blindly.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BusError::RegistryFull | BusError::DuplicateTopic | BusError::PayloadSizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(BusError::RegistryFull.is_fatal());
        assert!(BusError::DuplicateTopic.is_fatal());
        assert!(BusError::PayloadSizeMismatch { expected: 4, actual: 8 }.is_fatal());
        assert!(!BusError::UnknownTopic.is_fatal());
        assert!(!BusError::NoSlot.is_fatal());
    }
}
