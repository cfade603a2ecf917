use std::sync::Arc;

use parley::ActivityHandler;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The handler owns the conversation stores; cloning the state only clones
/// the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub handler: Arc<ActivityHandler>,
}

impl AppState {
    pub fn new(config: Config, handler: ActivityHandler) -> Self {
        Self {
            config: Arc::new(config),
            handler: Arc::new(handler),
        }
    }
}
