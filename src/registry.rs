//! Process-wide mapping from topic identity to topic instance.

use crate::error::{BusError, Result};
use crate::metadata::TopicMetadata;
use crate::mutex::Mutex;

struct RegistryState<const MAX_TOPICS: usize> {
    message_ids: [u64; MAX_TOPICS],
    descriptors: [Option<&'static TopicMetadata>; MAX_TOPICS],
    count: usize,
}

/// A fixed-capacity, process-singleton table of registered topics.
///
/// Registration happens once per topic during startup, before any
/// publisher/subscriber runs; `find` is the hot-path lookup, called once per
/// publish/subscribe/check/read.
pub struct TopicRegistry<const MAX_TOPICS: usize> {
    state: Mutex<RegistryState<MAX_TOPICS>>,
}

impl<const MAX_TOPICS: usize> TopicRegistry<MAX_TOPICS> {
    /// Construct an empty registry. `MAX_TOPICS` must be at least 1.
    pub const fn new() -> Self {
        static_assertions::const_assert!(MAX_TOPICS >= 1);
        Self {
            state: Mutex::new(RegistryState {
                message_ids: [0; MAX_TOPICS],
                descriptors: [None; MAX_TOPICS],
                count: 0,
            }),
        }
    }

    /// Register `descriptor`. Fails with [`BusError::DuplicateTopic`] if its
    /// `message_id` is already present, or [`BusError::RegistryFull`] if the
    /// table has no free slot.
    pub fn register(&self, descriptor: &'static TopicMetadata) -> Result<()> {
        let mut state = self.state.lock();
        let id = descriptor.message_id();
        if state.message_ids[..state.count].contains(&id) {
            return Err(BusError::DuplicateTopic);
        }
        if state.count == MAX_TOPICS {
            return Err(BusError::RegistryFull);
        }
        let idx = state.count;
        state.message_ids[idx] = id;
        state.descriptors[idx] = Some(descriptor);
        state.count += 1;
        #[cfg(feature = "trace-log")]
        {
            let topic_name = descriptor.topic_name;
            drop(state);
            tracing::debug!(topic_name, message_id = id, "registered topic");
        }
        Ok(())
    }

    /// Linear scan for the descriptor with this `message_id`.
    pub fn find(&self, message_id: u64) -> Option<&'static TopicMetadata> {
        let state = self.state.lock();
        state.message_ids[..state.count]
            .iter()
            .position(|id| *id == message_id)
            .and_then(|idx| state.descriptors[idx])
    }

    /// Number of registered topics.
    pub fn size(&self) -> usize {
        self.state.lock().count
    }

    /// Is the registry at capacity?
    pub fn full(&self) -> bool {
        self.state.lock().count == MAX_TOPICS
    }

    /// Is the registry empty?
    pub fn empty(&self) -> bool {
        self.state.lock().count == 0
    }

    /// Drop all registrations. Test-only: production code registers once
    /// at startup and never clears.
    #[cfg(test)]
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.count = 0;
        state.message_ids = [0; MAX_TOPICS];
        state.descriptors = [None; MAX_TOPICS];
    }

    /// Borrow the `i`th registered descriptor in registration order.
    pub fn iterate(&self, i: usize) -> Option<&'static TopicMetadata> {
        let state = self.state.lock();
        if i < state.count {
            state.descriptors[i]
        } else {
            None
        }
    }
}

impl<const MAX_TOPICS: usize> Default for TopicRegistry<MAX_TOPICS> {
    fn default() -> Self {
        Self::new()
    }
}
