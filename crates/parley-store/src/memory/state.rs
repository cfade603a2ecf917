use async_trait::async_trait;
use dashmap::DashMap;
use parley_types::SelectedTopic;

use crate::error::Result;
use crate::traits::ConversationStateStore;

/// In-memory [`ConversationStateStore`] keyed by conversation id
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    topics: DashMap<String, SelectedTopic>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStateStore for InMemoryStateStore {
    async fn selected_topic(&self, conversation_id: &str) -> Result<Option<SelectedTopic>> {
        Ok(self
            .topics
            .get(conversation_id)
            .map(|topic| topic.value().clone()))
    }

    async fn select_topic(&self, conversation_id: &str, topic: SelectedTopic) -> Result<()> {
        tracing::debug!(conversation_id, title = %topic.title, "Topic selected");
        self.topics.insert(conversation_id.to_string(), topic);
        Ok(())
    }

    async fn clear(&self, conversation_id: &str) -> Result<()> {
        self.topics.remove(conversation_id);
        Ok(())
    }
}
