use async_trait::async_trait;
use parley_types::SelectedTopic;
use thiserror::Error;

/// Input to a reply generator for one user message
#[derive(Debug, Clone)]
pub struct ReplyContext {
    pub conversation_id: String,
    pub text: String,
    pub topic: Option<SelectedTopic>,
}

#[derive(Debug, Error)]
pub enum ReplyError {
    /// The message only makes sense once an item has been selected
    #[error("No topic selected")]
    TopicRequired,

    #[error("Reply backend failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Maps an incoming message (and the conversation's selected topic) to reply text
///
/// Failures never reach the channel: the handler answers with its fallback text.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, context: &ReplyContext) -> Result<String, ReplyError>;
}
