//! Common imports for building on Parley
//!
//! ```rust
//! use parley::prelude::*;
//! ```

pub use crate::{
    Activity, ActivityHandler, ActivitySet, ActivityStore, ActivityType, ChannelAccount,
    ConversationAccount, ConversationStateStore, ExchangeConfig, ExchangeError,
    InMemoryActivityStore, InMemoryStateStore, KeywordReplyGenerator, ReplyContext, ReplyError,
    ReplyGenerator, ResourceResponse, SelectedTopic,
};
