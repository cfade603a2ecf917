//! # Parley
//!
//! Polling relay between a web chat client and a bot.
//!
//! The client POSTs activities; the bot's replies are buffered per
//! conversation and fetched with `GET` by watermark, the count of
//! activities the client has already seen.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parley::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = ActivityHandler::builder()
//!         .reply_generator(Arc::new(KeywordReplyGenerator::new()))
//!         .build()?;
//!
//!     let ack = handler
//!         .handle_incoming(Activity {
//!             text: Some("hello".to_string()),
//!             conversation: Some(ConversationAccount::new("conversation-123")),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("accepted {}", ack.id);
//!
//!     let set = handler.handle_poll("conversation-123", 0).await?;
//!     for activity in set.activities {
//!         println!("{:?}", activity.text);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`parley-types`**: Activity wire model and exchange configuration
//! - **`parley-store`**: Per-conversation activity buffers and topic state
//! - **`parley-bot`**: Ingest/poll handler and reply generators
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use parley_types::{
    is_human, Activity, ActivityError, ActivitySet, ActivityType, ChannelAccount,
    ConversationAccount, ExchangeConfig, InboundActivity, InboundEnvelope, ResourceResponse, Role,
    SelectedTopic,
};

pub use parley_store::{
    ActivityStore, ConversationStateStore, InMemoryActivityStore, InMemoryStateStore, StoreError,
};

pub use parley_bot::{
    ActivityHandler, ActivityHandlerBuilder, ExchangeError, KeywordReplyGenerator, ReplyContext,
    ReplyError, ReplyGenerator,
};
