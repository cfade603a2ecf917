pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{InMemoryActivityStore, InMemoryStateStore};
pub use traits::{ActivityStore, ConversationStateStore};
