//! Language-neutral top-level surface: the entry points generated topic
//! glue and hand-written application code both call.
//!
//! Every operation takes a `&'static TopicMetadata` as the topic's identity.
//! Each function re-checks registry membership rather than trusting the
//! descriptor's own `topic` pointer directly, so a descriptor that exists in
//! static storage but whose `register()` hook hasn't run yet is correctly
//! reported as unknown.

use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use crate::constants::DEFAULT_MAX_TOPICS;
use crate::error::{BusError, Result};
use crate::metadata::TopicMetadata;
use crate::registry::TopicRegistry;
use crate::token::Token;

/// The registry type backing the process-wide default instance.
pub type DefaultRegistry = TopicRegistry<DEFAULT_MAX_TOPICS>;

static REGISTRY: DefaultRegistry = DefaultRegistry::new();
static INIT_GUARD: OnceCell<()> = OnceCell::new();
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The process-wide topic registry. Exposed for callers that declare their
/// own topics with a custom `MAX_TOPICS` and need to register by hand.
pub fn registry() -> &'static DefaultRegistry {
    &REGISTRY
}

/// Run every topic's startup registration hook, in order, stopping at the
/// first failure. Idempotent: a second call is a no-op returning `Ok(())`,
/// even if passed a different (or empty) hook list.
pub fn init(hooks: &[fn() -> Result<()>]) -> Result<()> {
    let mut outcome = Ok(());
    INIT_GUARD.get_or_init(|| {
        for hook in hooks {
            if let Err(err) = hook() {
                outcome = Err(err);
                break;
            }
        }
        INITIALIZED.store(true, Ordering::Release);
    });
    outcome
}

fn is_registered(id: &'static TopicMetadata) -> bool {
    REGISTRY.find(id.message_id()).is_some()
}

/// Claim a subscription on `id`. `None` if `id` is not registered or the
/// topic's subscriber table is exhausted.
pub fn subscribe(id: &'static TopicMetadata) -> Option<Token> {
    if !is_registered(id) {
        return None;
    }
    id.topic.subscribe()
}

/// Release `token` on `id`. No-op if `id` is unregistered or `token` is
/// invalid.
pub fn unsubscribe(id: &'static TopicMetadata, token: Token) {
    if is_registered(id) {
        id.topic.unsubscribe(token);
    }
}

/// Does `token` have an unread message on `id`?
pub fn check(id: &'static TopicMetadata, token: Token) -> bool {
    is_registered(id) && id.topic.check(token)
}

/// Publish `msg` on `id`. `false` iff `id` is not registered.
pub fn publish<T: Copy>(id: &'static TopicMetadata, msg: T) -> bool {
    if !is_registered(id) {
        return false;
    }
    debug_assert_eq!(
        id.payload_size,
        std::mem::size_of::<T>(),
        "payload size mismatch for topic {:?}",
        id.topic_name
    );
    let bytes = unsafe {
        std::slice::from_raw_parts(&msg as *const T as *const u8, std::mem::size_of::<T>())
    };
    id.topic.publish_bytes(bytes);
    true
}

/// Like [`publish`], but surfaces a payload-size mismatch as an error
/// instead of a debug-only assertion.
pub fn publish_checked<T: Copy>(id: &'static TopicMetadata, msg: T) -> Result<()> {
    if !is_registered(id) {
        return Err(BusError::UnknownTopic);
    }
    if id.payload_size != std::mem::size_of::<T>() {
        return Err(BusError::PayloadSizeMismatch {
            expected: id.payload_size,
            actual: std::mem::size_of::<T>(),
        });
    }
    let bytes = unsafe {
        std::slice::from_raw_parts(&msg as *const T as *const u8, std::mem::size_of::<T>())
    };
    id.topic.publish_bytes(bytes);
    Ok(())
}

/// Return the next unread message for `token` on `id`.
pub fn read<T: Copy>(id: &'static TopicMetadata, token: Token) -> Option<T> {
    if !is_registered(id) {
        return None;
    }
    let mut buf = MaybeUninit::<T>::uninit();
    let out = unsafe {
        std::slice::from_raw_parts_mut(buf.as_mut_ptr() as *mut u8, std::mem::size_of::<T>())
    };
    if id.topic.read_bytes(token, out) {
        Some(unsafe { buf.assume_init() })
    } else {
        None
    }
}

/// Fill `out` with up to `out.len()` unread messages for `token` on `id`.
/// Returns the number copied.
pub fn read_multiple<T: Copy>(id: &'static TopicMetadata, token: Token, out: &mut [T]) -> usize {
    if !is_registered(id) || out.is_empty() {
        return 0;
    }
    let size = std::mem::size_of::<T>();
    let raw = unsafe { std::slice::from_raw_parts_mut(out.as_mut_ptr() as *mut u8, out.len() * size) };
    id.topic.read_multiple_bytes(token, raw)
}

/// Is `id` currently registered?
pub fn exists(id: &'static TopicMetadata) -> bool {
    is_registered(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::djb2;
    use crate::topic::Topic;

    static TOPIC: Topic<u32, 2, 4> = Topic::new();
    static METADATA: TopicMetadata = TopicMetadata {
        topic_name: "api_tests::sample",
        payload_size: std::mem::size_of::<u32>(),
        message_id: djb2("api_tests::sample"),
        #[cfg(feature = "schema-serde")]
        schema: None,
        topic: &TOPIC,
    };

    fn register() -> Result<()> {
        registry().register(&METADATA)
    }

    #[test]
    fn unregistered_topic_is_inert() {
        static TOPIC2: Topic<u32, 1, 2> = Topic::new();
        static META2: TopicMetadata = TopicMetadata {
            topic_name: "api_tests::never_registered",
            payload_size: 4,
            message_id: djb2("api_tests::never_registered"),
            #[cfg(feature = "schema-serde")]
            schema: None,
            topic: &TOPIC2,
        };
        assert!(!exists(&META2));
        assert!(!publish(&META2, 1u32));
        assert!(subscribe(&META2).is_none());
    }

    #[test]
    fn init_then_full_round_trip() {
        init(&[register]).unwrap();
        assert!(exists(&METADATA));
        let t = subscribe(&METADATA).unwrap();
        assert!(publish(&METADATA, 7u32));
        assert_eq!(read::<u32>(&METADATA, t), Some(7));
        assert_eq!(read::<u32>(&METADATA, t), None);
        unsubscribe(&METADATA, t);
    }

    #[test]
    fn init_is_idempotent() {
        init(&[register]).unwrap();
        init(&[register]).unwrap();
    }

    #[test]
    fn publish_checked_reports_size_mismatch() {
        init(&[register]).unwrap();
        let err = publish_checked::<u64>(&METADATA, 1u64).unwrap_err();
        assert_eq!(
            err,
            BusError::PayloadSizeMismatch {
                expected: 4,
                actual: 8
            }
        );
    }
}
