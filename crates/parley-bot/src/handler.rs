use std::sync::Arc;

use chrono::Utc;
use parley_store::{ActivityStore, ConversationStateStore};
use parley_types::{
    is_human, Activity, ActivitySet, ActivityType, ChannelAccount, ExchangeConfig,
    InboundActivity, InboundEnvelope, ResourceResponse, SelectedTopic,
};

use crate::builder::ActivityHandlerBuilder;
use crate::error::Result;
use crate::reply::{ReplyContext, ReplyError, ReplyGenerator};

/// Ingest and poll legs of the activity exchange
///
/// Ingest turns one inbound activity into at most one buffered reply and
/// acknowledges the write; delivery happens only through [`handle_poll`].
///
/// [`handle_poll`]: ActivityHandler::handle_poll
pub struct ActivityHandler {
    activities: Arc<dyn ActivityStore>,
    state: Arc<dyn ConversationStateStore>,
    replies: Arc<dyn ReplyGenerator>,
    config: ExchangeConfig,
}

impl ActivityHandler {
    pub fn new(
        activities: Arc<dyn ActivityStore>,
        state: Arc<dyn ConversationStateStore>,
        replies: Arc<dyn ReplyGenerator>,
        config: ExchangeConfig,
    ) -> Self {
        Self {
            activities,
            state,
            replies,
            config,
        }
    }

    pub fn builder() -> ActivityHandlerBuilder {
        ActivityHandlerBuilder::new()
    }

    pub fn activity_store(&self) -> &Arc<dyn ActivityStore> {
        &self.activities
    }

    /// Accept one inbound activity and buffer the reply, if any
    ///
    /// Fails only when the conversation id is missing, when a selection
    /// event carries no usable title, or when the store itself fails.
    pub async fn handle_incoming(&self, activity: Activity) -> Result<ResourceResponse> {
        let envelope = InboundEnvelope::try_from(activity)?;

        tracing::info!(
            conversation_id = %envelope.conversation_id(),
            activity_id = ?envelope.id,
            kind = kind_name(&envelope.kind),
            "Activity received"
        );

        let Some(text) = self.reply_text(&envelope).await? else {
            return Ok(ResourceResponse {
                id: new_activity_id(),
            });
        };

        let reply = self.build_reply(&envelope, text);
        let reply_id = reply.id.clone().unwrap_or_else(new_activity_id);

        let watermark = self
            .activities
            .append(envelope.conversation_id(), reply)
            .await?;

        tracing::debug!(
            conversation_id = %envelope.conversation_id(),
            reply_id = %reply_id,
            watermark,
            "Reply buffered"
        );

        Ok(ResourceResponse { id: reply_id })
    }

    /// Activities buffered for `conversation_id` from `watermark` on
    pub async fn handle_poll(&self, conversation_id: &str, watermark: u64) -> Result<ActivitySet> {
        let set = self.activities.read_since(conversation_id, watermark).await?;

        tracing::debug!(
            conversation_id,
            from = watermark,
            returned = set.activities.len(),
            watermark = set.watermark,
            "Poll served"
        );

        Ok(set)
    }

    /// Forget the conversation's selected topic
    pub async fn reset_conversation(&self, conversation_id: &str) -> Result<()> {
        self.state.clear(conversation_id).await?;
        tracing::info!(conversation_id, "Conversation state reset");
        Ok(())
    }

    async fn reply_text(&self, envelope: &InboundEnvelope) -> Result<Option<String>> {
        let conversation_id = envelope.conversation_id();

        match &envelope.kind {
            InboundActivity::ConversationUpdate { members_added } => {
                let greeted = members_added
                    .iter()
                    .any(|member| is_human(member, &self.config.bot_id));
                Ok(greeted.then(|| self.config.greeting.clone()))
            }
            InboundActivity::Event { name, value } if self.config.is_selection_event(name) => {
                let topic = SelectedTopic::from_event_value(value.as_ref())?;
                let text = self.config.render_selection_reply(&topic.title);

                tracing::info!(conversation_id, title = %topic.title, "Item selected");
                self.state.select_topic(conversation_id, topic).await?;

                Ok(Some(text))
            }
            InboundActivity::Message { text } => {
                let context = ReplyContext {
                    conversation_id: conversation_id.to_string(),
                    text: text.clone(),
                    topic: self.current_topic(conversation_id).await,
                };
                Ok(Some(self.generate_or_fallback(&context).await))
            }
            InboundActivity::Event { .. } | InboundActivity::Other => Ok(None),
        }
    }

    /// Selected topic, recovering from unreadable state by clearing it
    async fn current_topic(&self, conversation_id: &str) -> Option<SelectedTopic> {
        match self.state.selected_topic(conversation_id).await {
            Ok(topic) => topic,
            Err(e) => {
                tracing::warn!(conversation_id, error = %e, "Topic state unreadable, resetting");
                if let Err(e) = self.state.clear(conversation_id).await {
                    tracing::warn!(conversation_id, error = %e, "Topic state reset failed");
                }
                None
            }
        }
    }

    async fn generate_or_fallback(&self, context: &ReplyContext) -> String {
        match self.replies.generate(context).await {
            Ok(text) => text,
            Err(ReplyError::TopicRequired) => self.config.fallback_reply.clone(),
            Err(e) => {
                tracing::warn!(
                    conversation_id = %context.conversation_id,
                    error = %e,
                    "Reply generation failed, using fallback"
                );
                self.config.fallback_reply.clone()
            }
        }
    }

    fn build_reply(&self, envelope: &InboundEnvelope, text: String) -> Activity {
        Activity {
            activity_type: ActivityType::Message,
            id: Some(new_activity_id()),
            timestamp: Some(Utc::now()),
            from: Some(self.config.bot_account()),
            recipient: Some(
                envelope
                    .from
                    .clone()
                    .unwrap_or_else(ChannelAccount::anonymous_user),
            ),
            conversation: Some(envelope.conversation.clone()),
            text: Some(text),
            reply_to_id: envelope.id.clone(),
            ..Default::default()
        }
    }
}

fn new_activity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn kind_name(kind: &InboundActivity) -> &'static str {
    match kind {
        InboundActivity::ConversationUpdate { .. } => "conversationUpdate",
        InboundActivity::Event { .. } => "event",
        InboundActivity::Message { .. } => "message",
        InboundActivity::Other => "other",
    }
}
