//! Type-erased topic identity and dispatch.
//!
//! The registry never names a topic's concrete `T, RING_DEPTH,
//! MAX_SUBSCRIBERS` triple; it only ever sees a `&'static dyn ErasedTopic`
//! reached through a [`TopicMetadata`] descriptor. `Topic` implements
//! `ErasedTopic` over raw byte buffers so the registry's hot-path lookup
//! stays monomorphization-free, matching the source's function-pointer
//! vtable with Rust's own trait-object vtable instead of a hand-rolled one.

use crate::token::Token;

/// Operations the registry can perform on a topic without knowing its
/// concrete message type.
///
/// All byte-slice arguments/returns are raw `T` representations; callers at
/// the typed API layer (`crate::api`) are responsible for matching `T` to
/// `payload_size` before calling through here.
pub trait ErasedTopic: Send + Sync {
    fn subscribe(&self) -> Option<Token>;
    fn unsubscribe(&self, token: Token);
    fn check(&self, token: Token) -> bool;
    /// Copies `payload_size()` bytes from `msg` into the ring. `msg` must be
    /// at least `payload_size()` bytes.
    fn publish_bytes(&self, msg: &[u8]);
    /// Copies one message's bytes into `out` if one is unread. `out` must be
    /// at least `payload_size()` bytes.
    fn read_bytes(&self, token: Token, out: &mut [u8]) -> bool;
    /// Like `read_bytes`, repeated into consecutive `payload_size()`-sized
    /// chunks of `out` until exhausted or `out` is full. Returns the count
    /// copied.
    fn read_multiple_bytes(&self, token: Token, out: &mut [u8]) -> usize;
    fn subscriber_count(&self) -> usize;
}

/// Optional wire encoder/decoder supplied by an external schema toolchain.
///
/// The core never calls this; it is stored on the descriptor purely as a
/// collaboration point for code that wants to serialize a topic's payload.
#[cfg(feature = "schema-serde")]
pub trait SchemaCodec: Send + Sync {
    fn encode(&self, msg: &[u8], out: &mut Vec<u8>) -> crate::error::Result<()>;
    fn decode(&self, bytes: &[u8], out: &mut [u8]) -> crate::error::Result<()>;
}

/// A [`SchemaCodec`] for any payload type that derives `serde`'s
/// `Serialize`/`Deserialize`, using `bincode` as the wire format.
///
/// A generated schema module instantiates one `SerdeSchemaCodec<T>` per
/// message type instead of hand-writing byte-level encode/decode; this is
/// the concrete implementation the descriptor's `schema` field points at
/// when a topic opts into wire serialization.
#[cfg(feature = "schema-serde")]
pub struct SerdeSchemaCodec<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

#[cfg(feature = "schema-serde")]
impl<T> SerdeSchemaCodec<T> {
    pub const fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "schema-serde")]
impl<T> Default for SerdeSchemaCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "schema-serde")]
impl<T> SchemaCodec for SerdeSchemaCodec<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Copy + Send + Sync,
{
    fn encode(&self, msg: &[u8], out: &mut Vec<u8>) -> crate::error::Result<()> {
        debug_assert_eq!(msg.len(), std::mem::size_of::<T>());
        let value: T = unsafe { std::ptr::read_unaligned(msg.as_ptr() as *const T) };
        let bytes = bincode::serde::encode_to_vec(&value, bincode::config::standard())
            .map_err(|_| crate::error::BusError::CodecFailed)?;
        out.clear();
        out.extend_from_slice(&bytes);
        Ok(())
    }

    fn decode(&self, bytes: &[u8], out: &mut [u8]) -> crate::error::Result<()> {
        debug_assert_eq!(out.len(), std::mem::size_of::<T>());
        let (value, _): (T, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|_| crate::error::BusError::CodecFailed)?;
        unsafe {
            std::ptr::copy_nonoverlapping(
                &value as *const T as *const u8,
                out.as_mut_ptr(),
                std::mem::size_of::<T>(),
            );
        }
        Ok(())
    }
}

/// The statically allocated, immutable record that is a topic's identity.
///
/// The address of a `TopicMetadata` *is* the topic's identity at the API
/// layer: two handles referring to the same topic are `ptr::eq`. `message_id`
/// additionally lets the registry compare descriptors minted in separate
/// compilation units (e.g. generator output vs. hand-written `define_topic!`
/// uses) without pointer identity.
pub struct TopicMetadata {
    pub topic_name: &'static str,
    pub payload_size: usize,
    pub message_id: u64,
    #[cfg(feature = "schema-serde")]
    pub schema: Option<&'static dyn SchemaCodec>,
    pub topic: &'static dyn ErasedTopic,
}

impl TopicMetadata {
    pub fn message_id(&self) -> u64 {
        self.message_id
    }
}

impl std::fmt::Debug for TopicMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicMetadata")
            .field("topic_name", &self.topic_name)
            .field("payload_size", &self.payload_size)
            .field("message_id", &self.message_id)
            .finish()
    }
}
