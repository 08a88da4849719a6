//! A lightweight in-process publish/subscribe message-request bus for
//! embedded and realtime systems.
//!
//! Producers publish fixed-layout, `Copy` messages into named topics;
//! consumers poll a topic through an opaque [`Token`] and receive each
//! unread message exactly once. The bus never allocates on the hot path and
//! owns the only live copy of each message: publishing overwrites the
//! oldest retained value once a topic's ring fills.
//!
//! ```
//! use reqbus::define_topic;
//!
//! #[derive(Clone, Copy, Default)]
//! struct SensorTemperature {
//!     id: u32,
//!     temperature: f32,
//!     timestamp: u64,
//! }
//!
//! define_topic!(sensor_temperature, "sensor_temperature", SensorTemperature, 4, 8);
//!
//! reqbus::init(&[sensor_temperature::register]).unwrap();
//! let token = reqbus::subscribe(&sensor_temperature::METADATA).unwrap();
//! reqbus::publish(
//!     &sensor_temperature::METADATA,
//!     SensorTemperature { id: 1, temperature: 36.5, timestamp: 123 },
//! );
//! let reading: SensorTemperature =
//!     reqbus::read(&sensor_temperature::METADATA, token).unwrap();
//! assert_eq!(reading.id, 1);
//! ```
//!
//! Three components, in dependency order: [`subscriber_table::SubscriberTable`]
//! tracks per-subscriber read progress; [`topic::Topic`] owns one named
//! topic's ring buffer and serializes publishers, subscribers, and pollers
//! behind one mutex; [`registry::TopicRegistry`] is the process-singleton
//! map from a topic's compile-time identity to its type-erased instance.
//! [`api`] is the language-neutral surface tying the three together;
//! [`define_topic!`] is the declarative-macro sugar that a schema
//! toolchain's generated glue (or hand-written code) uses to stand up a
//! topic's static storage.

#[macro_use]
mod macros;

pub mod api;
pub mod constants;
pub mod error;
pub mod hash;
pub mod metadata;
pub mod mutex;
pub mod registry;
pub mod subscriber_table;
pub mod token;
pub mod topic;

pub use api::{
    check, exists, init, publish, publish_checked, read, read_multiple, registry as global_registry,
    subscribe, unsubscribe, DefaultRegistry,
};
pub use error::{BusError, Result};
pub use metadata::{ErasedTopic, TopicMetadata};
#[cfg(feature = "schema-serde")]
pub use metadata::{SchemaCodec, SerdeSchemaCodec};
pub use registry::TopicRegistry;
pub use subscriber_table::{SubscriberSlot, SubscriberTable};
pub use token::Token;
pub use topic::Topic;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    define_topic!(lib_smoke_topic, "lib_tests::smoke", u32, 2, 4);

    #[test]
    fn crate_level_round_trip() {
        init(&[lib_smoke_topic::register]).unwrap();
        let token = subscribe(&lib_smoke_topic::METADATA).unwrap();
        assert!(publish(&lib_smoke_topic::METADATA, 42u32));
        assert_eq!(read::<u32>(&lib_smoke_topic::METADATA, token), Some(42));
        unsubscribe(&lib_smoke_topic::METADATA, token);
    }
}
