//! Fixed-capacity subscriber bookkeeping for one topic.
//!
//! A `SubscriberTable` holds no lock of its own: the topic's single mutex
//! (see [`crate::topic::Topic`]) already serializes every access to it, and
//! giving the table a second, always-nested lock would only add overhead for
//! no additional safety. All methods here take `&mut self` and rely on the
//! caller to already be holding whatever exclusion the surrounding type
//! provides.

use crate::token::Token;

/// Per-subscriber read progress inside one topic's ring buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriberSlot {
    pub(crate) active: bool,
    pub(crate) last_read_seq: u64,
    pub(crate) read_buffer_idx: usize,
}

/// A fixed-capacity table of up to `MAX_SUBSCRIBERS` subscriber slots.
///
/// Slot indices double as [`Token`]s: `subscribe` claims the lowest free
/// index and returns it, `unsubscribe` frees it for reuse.
pub struct SubscriberTable<const MAX_SUBSCRIBERS: usize> {
    slots: [SubscriberSlot; MAX_SUBSCRIBERS],
}

impl<const MAX_SUBSCRIBERS: usize> SubscriberTable<MAX_SUBSCRIBERS> {
    /// Construct an empty table. `MAX_SUBSCRIBERS` must be at least 1.
    pub const fn new() -> Self {
        static_assertions::const_assert!(MAX_SUBSCRIBERS >= 1);
        Self {
            slots: [SubscriberSlot {
                active: false,
                last_read_seq: 0,
                read_buffer_idx: 0,
            }; MAX_SUBSCRIBERS],
        }
    }

    /// Claim the first inactive slot, returning its index as a [`Token`].
    ///
    /// The returned slot's `last_read_seq`/`read_buffer_idx` are placeholder
    /// zeros — `Topic::subscribe` overwrites them so a fresh subscriber only
    /// sees messages published after it subscribes. Returns `None` if every
    /// slot is active.
    pub fn subscribe(&mut self) -> Option<Token> {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if !slot.active {
                slot.active = true;
                slot.last_read_seq = 0;
                slot.read_buffer_idx = 0;
                return Some(idx);
            }
        }
        None
    }

    /// Release `token` back to the pool. Invalid tokens are ignored.
    pub fn unsubscribe(&mut self, token: Token) {
        if let Some(slot) = self.slots.get_mut(token) {
            slot.active = false;
            slot.last_read_seq = 0;
            slot.read_buffer_idx = 0;
        }
    }

    /// Does `token` have at least one unread message as of `current_seq`?
    pub fn check(&self, token: Token, current_seq: u64) -> bool {
        match self.slots.get(token) {
            Some(slot) => slot.active && slot.last_read_seq < current_seq,
            None => false,
        }
    }

    /// Overwrite `token`'s read progress. No-op if `token` is inactive or
    /// out of range.
    pub fn update_read_state(&mut self, token: Token, new_seq: u64, new_idx: usize) {
        if let Some(slot) = self.slots.get_mut(token) {
            if slot.active {
                slot.last_read_seq = new_seq;
                slot.read_buffer_idx = new_idx;
            }
        }
    }

    /// Borrow the slot for `token` for the owning `Topic`'s read path.
    /// Out-of-range tokens return `None`; the slot may still be inactive.
    pub fn get_slot(&mut self, token: Token) -> Option<&mut SubscriberSlot> {
        self.slots.get_mut(token)
    }

    /// Number of currently active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Total slot capacity.
    pub const fn capacity(&self) -> usize {
        MAX_SUBSCRIBERS
    }
}

impl<const MAX_SUBSCRIBERS: usize> Default for SubscriberTable<MAX_SUBSCRIBERS> {
    fn default() -> Self {
        Self::new()
    }
}
