//! Compile-time defaults for the bus.
//!
//! These are the defaults from the topic-registration contract; callers that
//! need a different shape instantiate [`crate::registry::TopicRegistry`] and
//! [`crate::topic::Topic`] with their own const generic parameters directly.

/// Default registry capacity (topics registered process-wide).
pub const DEFAULT_MAX_TOPICS: usize = 16;

/// Default subscriber slots per topic.
pub const DEFAULT_MAX_SUBSCRIBERS: usize = 8;

/// Default ring-buffer depth for a topic (latest-value semantics).
pub const DEFAULT_RING_DEPTH: usize = 1;
