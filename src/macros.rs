//! Topic declaration macro.
//!
//! ## Macros
//!
//! | Macro | Use Case |
//! |-------|----------|
//! | `define_topic!` | Emit a topic's static storage, metadata descriptor, and registration hook |

// =============================================================================
// TOPIC DECLARATION
// =============================================================================

/// Declare a topic: its static `Topic<T, RING_DEPTH, MAX_SUBSCRIBERS>`
/// storage, its static [`crate::metadata::TopicMetadata`] descriptor, and a
/// `register()` function suitable for passing to [`crate::api::init`].
///
/// Expands to a module named `$module` containing `TOPIC`, `METADATA`, and
/// `register()`. Hand-written code and schema-toolchain-generated code are
/// expected to emit exactly this shape.
///
/// ```ignore
/// define_topic!(sensor_temperature, "sensor_temperature", SensorTemperature, 4, 8);
///
/// reqbus::init(&[sensor_temperature::register])?;
/// reqbus::publish(&sensor_temperature::METADATA, reading);
/// ```
#[macro_export]
macro_rules! define_topic {
    ($module:ident, $name:expr, $ty:ty, $ring_depth:expr, $max_subscribers:expr) => {
        pub mod $module {
            #[allow(unused_imports)]
            use super::*;

            pub static TOPIC: $crate::topic::Topic<$ty, $ring_depth, $max_subscribers> =
                $crate::topic::Topic::new();

            pub static METADATA: $crate::metadata::TopicMetadata = $crate::metadata::TopicMetadata {
                topic_name: $name,
                payload_size: std::mem::size_of::<$ty>(),
                message_id: $crate::hash::djb2($name),
                #[cfg(feature = "schema-serde")]
                schema: None,
                topic: &TOPIC,
            };

            /// Registers this topic with the process-wide default registry.
            /// Intended to be passed by name to [`$crate::api::init`].
            pub fn register() -> $crate::error::Result<()> {
                $crate::api::registry().register(&METADATA)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Clone, Copy, Default)]
    struct Reading {
        value: u32,
    }

    define_topic!(macro_test_topic, "macro_test::reading", Reading, 2, 4);

    #[test]
    fn declared_topic_registers_and_round_trips() {
        crate::api::init(&[macro_test_topic::register]).unwrap();
        assert!(crate::api::exists(&macro_test_topic::METADATA));
        let token = crate::api::subscribe(&macro_test_topic::METADATA).unwrap();
        crate::api::publish(&macro_test_topic::METADATA, Reading { value: 9 });
        let got = crate::api::read::<Reading>(&macro_test_topic::METADATA, token).unwrap();
        assert_eq!(got.value, 9);
    }
}
