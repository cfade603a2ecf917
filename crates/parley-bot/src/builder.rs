use std::sync::Arc;

use anyhow::{anyhow, Result};
use parley_store::{ActivityStore, ConversationStateStore, InMemoryActivityStore, InMemoryStateStore};
use parley_types::ExchangeConfig;

use crate::handler::ActivityHandler;
use crate::reply::ReplyGenerator;

/// Builder for an [`ActivityHandler`]
///
/// Stores default to the in-memory implementations; the reply generator
/// must be supplied.
pub struct ActivityHandlerBuilder {
    activity_store: Option<Arc<dyn ActivityStore>>,
    state_store: Option<Arc<dyn ConversationStateStore>>,
    reply_generator: Option<Arc<dyn ReplyGenerator>>,
    config: ExchangeConfig,
}

impl ActivityHandlerBuilder {
    pub fn new() -> Self {
        Self {
            activity_store: None,
            state_store: None,
            reply_generator: None,
            config: ExchangeConfig::default(),
        }
    }

    pub fn activity_store(mut self, store: Arc<dyn ActivityStore>) -> Self {
        self.activity_store = Some(store);
        self
    }

    pub fn state_store(mut self, store: Arc<dyn ConversationStateStore>) -> Self {
        self.state_store = Some(store);
        self
    }

    pub fn reply_generator(mut self, generator: Arc<dyn ReplyGenerator>) -> Self {
        self.reply_generator = Some(generator);
        self
    }

    pub fn config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ActivityHandler> {
        let reply_generator = self
            .reply_generator
            .ok_or_else(|| anyhow!("Reply generator is required"))?;

        if self.config.selection_events.is_empty() {
            tracing::warn!("No selection event names configured; item selections will be ignored");
        }

        let activity_store = self
            .activity_store
            .unwrap_or_else(|| Arc::new(InMemoryActivityStore::new()) as Arc<dyn ActivityStore>);
        let state_store = self
            .state_store
            .unwrap_or_else(|| Arc::new(InMemoryStateStore::new()) as Arc<dyn ConversationStateStore>);

        Ok(ActivityHandler::new(
            activity_store,
            state_store,
            reply_generator,
            self.config,
        ))
    }
}

impl Default for ActivityHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
