use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::inbound::ActivityError;

/// Item the user last selected in the client (e.g. a news article)
///
/// Replies to later messages in the same conversation are contextualized
/// with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTopic {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Any other fields the client attached to the selection
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectedTopic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: None,
            extra: Map::new(),
        }
    }

    /// Parse the `value` of a selection event. A non-blank `title` is required.
    pub fn from_event_value(value: Option<&Value>) -> Result<Self, ActivityError> {
        let value = value.ok_or_else(|| ActivityError::InvalidTopic("missing event value".into()))?;

        let topic: SelectedTopic = serde_json::from_value(value.clone())
            .map_err(|e| ActivityError::InvalidTopic(e.to_string()))?;

        if topic.title.trim().is_empty() {
            return Err(ActivityError::InvalidTopic("title is empty".into()));
        }

        Ok(topic)
    }
}
