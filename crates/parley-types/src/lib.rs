pub mod activity;
pub mod config;
pub mod inbound;
pub mod topic;

pub use activity::{
    Activity, ActivitySet, ActivityType, ChannelAccount, ConversationAccount, ResourceResponse,
    Role,
};
pub use config::ExchangeConfig;
pub use inbound::{is_human, ActivityError, InboundActivity, InboundEnvelope};
pub use topic::SelectedTopic;
