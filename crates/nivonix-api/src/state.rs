use std::sync::Arc;

use nivonix_auth::AuthService;
use nivonix_chat::ConversationService;
use nivonix_persist::ThreadStore;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub chat: Arc<ConversationService>,
    pub store: Arc<dyn ThreadStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: Arc<AuthService>,
        chat: Arc<ConversationService>,
        store: Arc<dyn ThreadStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            chat,
            store,
        }
    }
}
