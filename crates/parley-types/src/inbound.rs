use serde_json::Value;
use thiserror::Error;

use crate::activity::{Activity, ActivityType, ChannelAccount, ConversationAccount, Role};

#[derive(Debug, Error, PartialEq)]
pub enum ActivityError {
    #[error("Missing conversation id")]
    MissingConversationId,

    #[error("Invalid topic payload: {0}")]
    InvalidTopic(String),
}

/// Inbound activity after boundary validation
///
/// Handlers match on this instead of probing optional fields of [`Activity`].
#[derive(Debug, Clone, PartialEq)]
pub enum InboundActivity {
    ConversationUpdate { members_added: Vec<ChannelAccount> },
    Event { name: String, value: Option<Value> },
    Message { text: String },
    /// Anything that never produces a reply (typing, empty messages, nameless events)
    Other,
}

/// Correlation data shared by every inbound activity
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEnvelope {
    pub id: Option<String>,
    pub conversation: ConversationAccount,
    pub from: Option<ChannelAccount>,
    pub kind: InboundActivity,
}

impl InboundEnvelope {
    pub fn conversation_id(&self) -> &str {
        &self.conversation.id
    }
}

impl TryFrom<Activity> for InboundEnvelope {
    type Error = ActivityError;

    fn try_from(activity: Activity) -> Result<Self, Self::Error> {
        let conversation = activity
            .conversation
            .filter(|c| !c.id.trim().is_empty())
            .ok_or(ActivityError::MissingConversationId)?;

        let kind = match activity.activity_type {
            ActivityType::ConversationUpdate => InboundActivity::ConversationUpdate {
                members_added: activity.members_added,
            },
            ActivityType::Event => match activity.name {
                Some(name) => InboundActivity::Event {
                    name,
                    value: activity.value,
                },
                None => InboundActivity::Other,
            },
            ActivityType::Message => match activity.text {
                Some(text) if !text.trim().is_empty() => InboundActivity::Message { text },
                _ => InboundActivity::Other,
            },
            ActivityType::Unknown => InboundActivity::Other,
        };

        Ok(Self {
            id: activity.id,
            conversation,
            from: activity.from,
            kind,
        })
    }
}

/// Whether `member` is a human participant rather than the bot itself
///
/// An explicit role wins; without one, anyone but the bot counts as human.
pub fn is_human(member: &ChannelAccount, bot_id: &str) -> bool {
    match member.role {
        Some(Role::User) => true,
        Some(Role::Bot) => false,
        None => member.id != bot_id,
    }
}
