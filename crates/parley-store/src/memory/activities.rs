use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use parley_types::{Activity, ActivitySet};

use crate::error::Result;
use crate::traits::ActivityStore;

/// Outbound activities of one conversation, in delivery order
#[derive(Debug, Default)]
struct ConversationRecord {
    activities: Vec<Activity>,
}

impl ConversationRecord {
    fn watermark(&self) -> u64 {
        self.activities.len() as u64
    }

    fn push(&mut self, activity: Activity) -> u64 {
        self.activities.push(activity);
        self.watermark()
    }

    fn slice_since(&self, watermark: u64) -> ActivitySet {
        let start = usize::try_from(watermark)
            .unwrap_or(usize::MAX)
            .min(self.activities.len());

        ActivitySet {
            activities: self.activities[start..].to_vec(),
            watermark: self.watermark(),
        }
    }
}

/// In-memory [`ActivityStore`]
///
/// The map only resolves a conversation to its record; each record sits
/// behind its own mutex, so the (sequence, watermark) pair is always read and
/// written together and conversations never wait on each other.
#[derive(Debug, Default)]
pub struct InMemoryActivityStore {
    conversations: DashMap<String, Arc<Mutex<ConversationRecord>>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_or_create(&self, conversation_id: &str) -> Arc<Mutex<ConversationRecord>> {
        if let Some(record) = self.conversations.get(conversation_id) {
            return Arc::clone(record.value());
        }

        Arc::clone(
            self.conversations
                .entry(conversation_id.to_string())
                .or_default()
                .value(),
        )
    }

    fn record(&self, conversation_id: &str) -> Option<Arc<Mutex<ConversationRecord>>> {
        self.conversations
            .get(conversation_id)
            .map(|record| Arc::clone(record.value()))
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn append(&self, conversation_id: &str, activity: Activity) -> Result<u64> {
        let record = self.record_or_create(conversation_id);
        let watermark = record.lock().push(activity);

        tracing::debug!(conversation_id, watermark, "Activity buffered");
        Ok(watermark)
    }

    async fn read_since(&self, conversation_id: &str, watermark: u64) -> Result<ActivitySet> {
        let Some(record) = self.record(conversation_id) else {
            return Ok(ActivitySet::empty());
        };

        let set = record.lock().slice_since(watermark);
        Ok(set)
    }

    async fn conversation_count(&self) -> Result<usize> {
        Ok(self.conversations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> Activity {
        Activity {
            text: Some(t.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_slice_clamps_past_end() {
        let mut record = ConversationRecord::default();
        record.push(text("a"));
        record.push(text("b"));

        let set = record.slice_since(10);
        assert!(set.activities.is_empty());
        assert_eq!(set.watermark, 2);

        let set = record.slice_since(u64::MAX);
        assert!(set.activities.is_empty());
        assert_eq!(set.watermark, 2);
    }

    #[test]
    fn test_slice_starts_exactly_at_watermark() {
        let mut record = ConversationRecord::default();
        for t in ["a", "b", "c"] {
            record.push(text(t));
        }

        let set = record.slice_since(1);
        let texts: Vec<_> = set.activities.iter().filter_map(|a| a.text.as_deref()).collect();
        assert_eq!(texts, vec!["b", "c"]);
        assert_eq!(set.watermark, 3);
    }
}
