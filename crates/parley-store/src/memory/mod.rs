//! Process-lifetime stores. Nothing is evicted and nothing survives a restart.

mod activities;
mod state;

pub use activities::InMemoryActivityStore;
pub use state::InMemoryStateStore;
