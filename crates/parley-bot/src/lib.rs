pub mod builder;
pub mod error;
pub mod handler;
pub mod keyword;
pub mod reply;

pub use builder::ActivityHandlerBuilder;
pub use error::{ExchangeError, Result};
pub use handler::ActivityHandler;
pub use keyword::KeywordReplyGenerator;
pub use reply::{ReplyContext, ReplyError, ReplyGenerator};
