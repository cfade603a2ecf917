use serde::{Deserialize, Serialize};

use crate::activity::{ChannelAccount, Role};

/// Bot identity and the fixed texts of the activity exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub bot_id: String,
    pub bot_name: String,

    /// Sent when a human joins the conversation
    pub greeting: String,

    /// Acknowledgment of a selection event; `{title}` is replaced by the item title
    pub selection_reply: String,

    /// Used whenever the reply generator cannot answer
    pub fallback_reply: String,

    /// Event names treated as "item selected" (aliases accepted)
    pub selection_events: Vec<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            bot_id: "bot".to_string(),
            bot_name: "News Bot".to_string(),
            greeting: "👋 Bonjour ! Je suis votre assistant actualités. Sélectionnez un article pour discuter.".to_string(),
            selection_reply: "📰 Merci d'avoir sélectionné : \"{title}\"\n\nQue souhaitez-vous savoir sur cet article ?".to_string(),
            fallback_reply: "Je suis votre assistant actualités. Sélectionnez d'abord un article, puis posez-moi vos questions.".to_string(),
            selection_events: vec![
                "newsSelected".to_string(),
                "itemSelected".to_string(),
                "item selected".to_string(),
            ],
        }
    }
}

impl ExchangeConfig {
    pub fn bot_account(&self) -> ChannelAccount {
        ChannelAccount::new(&self.bot_id)
            .with_name(&self.bot_name)
            .with_role(Role::Bot)
    }

    pub fn is_selection_event(&self, name: &str) -> bool {
        self.selection_events
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub fn render_selection_reply(&self, title: &str) -> String {
        self.selection_reply.replace("{title}", title)
    }
}
