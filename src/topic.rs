//! Per-topic ring buffer, sequence counter, and subscriber bookkeeping.

use std::mem::MaybeUninit;

use crate::metadata::ErasedTopic;
use crate::mutex::Mutex;
use crate::subscriber_table::SubscriberTable;
use crate::token::Token;

/// Everything a topic mutex protects: the ring, the write head, the
/// publish sequence, and the subscriber table. One mutex guards all four so
/// a `read` always observes a consistent (head, sequence, subscriber-state)
/// triple.
struct TopicState<T, const RING_DEPTH: usize, const MAX_SUBSCRIBERS: usize> {
    buffer: [MaybeUninit<T>; RING_DEPTH],
    head: usize,
    sequence: u64,
    subscribers: SubscriberTable<MAX_SUBSCRIBERS>,
}

/// One instance per message type per named topic.
///
/// `RING_DEPTH` is the number of past messages retained (`N` in the
/// overrun law); `MAX_SUBSCRIBERS` is the concurrent-subscriber capacity.
/// `T` must be cheap to copy: the hot path never does anything to a message
/// beyond `buffer[i] = msg` and `out = buffer[i]`.
pub struct Topic<T, const RING_DEPTH: usize, const MAX_SUBSCRIBERS: usize> {
    state: Mutex<TopicState<T, RING_DEPTH, MAX_SUBSCRIBERS>>,
}

impl<T, const RING_DEPTH: usize, const MAX_SUBSCRIBERS: usize> Topic<T, RING_DEPTH, MAX_SUBSCRIBERS>
where
    T: Copy,
{
    /// Construct an empty topic, suitable for `static` storage.
    /// `RING_DEPTH` and `MAX_SUBSCRIBERS` must both be at least 1.
    pub const fn new() -> Self {
        static_assertions::const_assert!(RING_DEPTH >= 1);
        Self {
            // Safety: an array of `MaybeUninit<T>` needs no initialization
            // of its own; no slot is read before `publish` has written it
            // (see `read`'s reachability argument below).
            state: Mutex::new(TopicState {
                buffer: unsafe { MaybeUninit::uninit().assume_init() },
                head: 0,
                sequence: 0,
                subscribers: SubscriberTable::new(),
            }),
        }
    }

    /// Publish `msg`. Never blocks longer than the mutex, never fails,
    /// always strictly increases `sequence`.
    pub fn publish(&self, msg: T) {
        let mut state = self.state.lock();
        let head = state.head;
        state.buffer[head] = MaybeUninit::new(msg);
        state.head = (head + 1) % RING_DEPTH;
        state.sequence += 1;
        #[cfg(feature = "trace-log")]
        let sequence = state.sequence;
        drop(state);
        #[cfg(feature = "trace-log")]
        tracing::trace!(sequence, "published");
    }

    /// Claim a subscriber slot. The subscriber sees no history: its first
    /// successful read is the next publish after this call.
    pub fn subscribe(&self) -> Option<Token> {
        let mut state = self.state.lock();
        let token = state.subscribers.subscribe()?;
        let sequence = state.sequence;
        let head = state.head;
        let read_buffer_idx = if sequence < RING_DEPTH as u64 { 0 } else { head };
        state
            .subscribers
            .update_read_state(token, sequence, read_buffer_idx);
        #[cfg(feature = "trace-log")]
        {
            drop(state);
            tracing::trace!(token, "subscribed");
        }
        Some(token)
    }

    /// Release `token`. Idempotent for invalid tokens.
    pub fn unsubscribe(&self, token: Token) {
        self.state.lock().subscribers.unsubscribe(token);
        #[cfg(feature = "trace-log")]
        tracing::trace!(token, "unsubscribed");
    }

    /// Does `token` have at least one unread message?
    pub fn check(&self, token: Token) -> bool {
        let state = self.state.lock();
        state.subscribers.check(token, state.sequence)
    }

    /// Single-read logic against an already-locked state. Shared by `read`
    /// (one call) and `read_multiple`/`read_multiple_bytes` (looped under
    /// one held guard), so batch reads stay one critical section instead of
    /// one per message.
    ///
    /// Reconciles overrun before copying: a subscriber that has fallen more
    /// than `RING_DEPTH` publishes behind jumps straight to the oldest
    /// still-resident message rather than reading stale or overwritten
    /// bytes. Overrun can only be reached once `sequence > RING_DEPTH`, at
    /// which point every slot in `buffer` has been written at least once, so
    /// the `assume_init` below is always sound.
    fn read_locked(
        state: &mut TopicState<T, RING_DEPTH, MAX_SUBSCRIBERS>,
        token: Token,
    ) -> Option<T> {
        let sequence = state.sequence;
        let head = state.head;

        let (active, mut last_read_seq, mut read_buffer_idx) = {
            let slot = state.subscribers.get_slot(token)?;
            (slot.active, slot.last_read_seq, slot.read_buffer_idx)
        };
        if !active || last_read_seq >= sequence {
            return None;
        }
        if RING_DEPTH > 1 && sequence - last_read_seq > RING_DEPTH as u64 {
            read_buffer_idx = head;
            last_read_seq = sequence - RING_DEPTH as u64;
        }
        let msg = unsafe { state.buffer[read_buffer_idx].assume_init() };
        last_read_seq += 1;
        read_buffer_idx = (read_buffer_idx + 1) % RING_DEPTH;
        state
            .subscribers
            .update_read_state(token, last_read_seq, read_buffer_idx);
        Some(msg)
    }

    /// Return the next unread message for `token`, or `None` if caught up.
    pub fn read(&self, token: Token) -> Option<T> {
        let mut state = self.state.lock();
        let msg = Self::read_locked(&mut state, token);
        #[cfg(feature = "trace-log")]
        {
            let found = msg.is_some();
            drop(state);
            tracing::trace!(token, found, "read");
        }
        msg
    }

    /// Read up to `out.len()` messages, stopping early when no more unread
    /// messages remain. Returns the number copied.
    ///
    /// Takes the topic's mutex once for the whole call, matching
    /// `topic.hpp`'s `read_multiple`: the entire batch is one critical
    /// section, so a publisher can never interleave between messages within
    /// a single call.
    pub fn read_multiple(&self, token: Token, out: &mut [T]) -> usize {
        let mut state = self.state.lock();
        let mut count = 0;
        for slot in out.iter_mut() {
            match Self::read_locked(&mut state, token) {
                Some(msg) => {
                    *slot = msg;
                    count += 1;
                }
                None => break,
            }
        }
        #[cfg(feature = "trace-log")]
        {
            drop(state);
            tracing::trace!(token, count, "read_multiple");
        }
        count
    }

    /// Number of currently active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.subscriber_count()
    }
}

impl<T, const RING_DEPTH: usize, const MAX_SUBSCRIBERS: usize> Default for Topic<T, RING_DEPTH, MAX_SUBSCRIBERS>
where
    T: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Adapts `Topic<T, RING_DEPTH, MAX_SUBSCRIBERS>` to the registry's
/// type-erased dispatch surface by copying raw bytes in and out.
impl<T, const RING_DEPTH: usize, const MAX_SUBSCRIBERS: usize> ErasedTopic
    for Topic<T, RING_DEPTH, MAX_SUBSCRIBERS>
where
    T: Copy + Send + Sync,
{
    fn subscribe(&self) -> Option<Token> {
        Topic::subscribe(self)
    }

    fn unsubscribe(&self, token: Token) {
        Topic::unsubscribe(self, token)
    }

    fn check(&self, token: Token) -> bool {
        Topic::check(self, token)
    }

    fn publish_bytes(&self, msg: &[u8]) {
        debug_assert!(msg.len() >= std::mem::size_of::<T>());
        let mut value = MaybeUninit::<T>::uninit();
        unsafe {
            std::ptr::copy_nonoverlapping(
                msg.as_ptr(),
                value.as_mut_ptr() as *mut u8,
                std::mem::size_of::<T>(),
            );
            self.publish(value.assume_init());
        }
    }

    fn read_bytes(&self, token: Token, out: &mut [u8]) -> bool {
        debug_assert!(out.len() >= std::mem::size_of::<T>());
        match self.read(token) {
            Some(value) => {
                unsafe {
                    std::ptr::copy_nonoverlapping(
                        &value as *const T as *const u8,
                        out.as_mut_ptr(),
                        std::mem::size_of::<T>(),
                    );
                }
                true
            }
            None => false,
        }
    }

    fn read_multiple_bytes(&self, token: Token, out: &mut [u8]) -> usize {
        let size = std::mem::size_of::<T>();
        let capacity = out.len() / size;
        let mut state = self.state.lock();
        let mut count = 0;
        for i in 0..capacity {
            match Self::read_locked(&mut state, token) {
                Some(value) => {
                    unsafe {
                        std::ptr::copy_nonoverlapping(
                            &value as *const T as *const u8,
                            out[i * size..(i + 1) * size].as_mut_ptr(),
                            size,
                        );
                    }
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    fn subscriber_count(&self) -> usize {
        Topic::subscriber_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_then_read_n1() {
        let topic: Topic<u32, 1, 4> = Topic::new();
        let t = topic.subscribe().unwrap();
        topic.publish(42);
        assert!(topic.check(t));
        assert_eq!(topic.read(t), Some(42));
        assert_eq!(topic.read(t), None);
    }

    #[test]
    fn two_subscribers_see_same_value_independently() {
        let topic: Topic<u32, 1, 4> = Topic::new();
        let t1 = topic.subscribe().unwrap();
        let t2 = topic.subscribe().unwrap();
        topic.publish(101);
        assert_eq!(topic.read(t1), Some(101));
        assert_eq!(topic.read(t2), Some(101));
        assert_eq!(topic.read(t1), None);
        assert_eq!(topic.read(t2), None);
    }

    #[test]
    fn burst_within_depth_reads_in_order() {
        let topic: Topic<u32, 4, 4> = Topic::new();
        let t = topic.subscribe().unwrap();
        for v in 0..4 {
            topic.publish(v);
        }
        for v in 0..4 {
            assert_eq!(topic.read(t), Some(v));
        }
        assert_eq!(topic.read(t), None);
    }

    #[test]
    fn overrun_reconciles_to_oldest_resident() {
        let topic: Topic<u32, 3, 4> = Topic::new();
        let t = topic.subscribe().unwrap();
        for v in 0..7 {
            topic.publish(v);
        }
        let mut seen = Vec::new();
        while let Some(v) = topic.read(t) {
            seen.push(v);
        }
        assert_eq!(seen, vec![4, 5, 6]);
    }

    #[test]
    fn read_multiple_stops_when_exhausted() {
        let topic: Topic<u32, 4, 4> = Topic::new();
        let t = topic.subscribe().unwrap();
        topic.publish(1);
        topic.publish(2);
        let mut out = [0u32; 4];
        let n = topic.read_multiple(t, &mut out);
        assert_eq!(n, 2);
        assert_eq!(&out[..2], &[1, 2]);
    }

    #[test]
    fn subscribe_after_publish_sees_only_future_messages() {
        let topic: Topic<u32, 4, 4> = Topic::new();
        topic.publish(1);
        topic.publish(2);
        let t = topic.subscribe().unwrap();
        assert_eq!(topic.read(t), None);
        topic.publish(3);
        assert_eq!(topic.read(t), Some(3));
    }

    #[test]
    fn slot_exhaustion_and_reuse() {
        let topic: Topic<u32, 1, 2> = Topic::new();
        let t1 = topic.subscribe().unwrap();
        let _t2 = topic.subscribe().unwrap();
        assert_eq!(topic.subscribe(), None);
        topic.unsubscribe(t1);
        assert!(topic.subscribe().is_some());
    }

    #[test]
    fn static_topic_storage_is_const_initializable() {
        static TOPIC: Topic<u32, 2, 2> = Topic::new();
        let t = TOPIC.subscribe().unwrap();
        TOPIC.publish(7);
        assert_eq!(TOPIC.read(t), Some(7));
    }

    #[test]
    fn read_multiple_matches_overrun_reconciliation_mid_batch() {
        // Published 5 messages into a depth-3 ring before any read, so the
        // first two of the 5 are already gone by the time read_multiple
        // runs. A single read_multiple call must apply overrun
        // reconciliation exactly once, the same as repeated single reads.
        let topic: Topic<u32, 3, 4> = Topic::new();
        let t = topic.subscribe().unwrap();
        for v in 0..5 {
            topic.publish(v);
        }
        let mut out = [0u32; 8];
        let n = topic.read_multiple(t, &mut out);
        assert_eq!(n, 3);
        assert_eq!(&out[..3], &[2, 3, 4]);
    }

    #[test]
    fn erased_topic_round_trips_bytes() {
        let topic: Topic<u32, 1, 4> = Topic::new();
        let erased: &dyn ErasedTopic = &topic;
        let t = erased.subscribe().unwrap();
        erased.publish_bytes(&42u32.to_ne_bytes());
        let mut out = [0u8; 4];
        assert!(erased.read_bytes(t, &mut out));
        assert_eq!(u32::from_ne_bytes(out), 42);
    }
}
