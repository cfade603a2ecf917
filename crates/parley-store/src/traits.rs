use async_trait::async_trait;
use parley_types::{Activity, ActivitySet, SelectedTopic};

use crate::error::Result;

/// Per-conversation append log of outbound activities
///
/// The watermark of a conversation is the number of activities ever appended
/// to it. Implementations must make `append` and `read_since` linearizable
/// per conversation and must not serialize unrelated conversations.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Append an activity, creating the conversation on first use.
    /// Returns the conversation's new watermark.
    async fn append(&self, conversation_id: &str, activity: Activity) -> Result<u64>;

    /// Activities at index >= `watermark`, plus the current watermark.
    /// Unknown conversations read as empty with watermark 0.
    async fn read_since(&self, conversation_id: &str, watermark: u64) -> Result<ActivitySet>;

    /// Number of conversations with at least one buffered activity
    async fn conversation_count(&self) -> Result<usize>;
}

/// Per-conversation "selected topic" cell
#[async_trait]
pub trait ConversationStateStore: Send + Sync {
    async fn selected_topic(&self, conversation_id: &str) -> Result<Option<SelectedTopic>>;

    /// Overwrites any previous selection
    async fn select_topic(&self, conversation_id: &str, topic: SelectedTopic) -> Result<()>;

    async fn clear(&self, conversation_id: &str) -> Result<()>;
}
