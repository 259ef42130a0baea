use std::sync::Arc;

use crate::db::HistoryStore;
use crate::services::ChatService;

/// Shared application state
///
/// Everything here is read-only after startup; handlers never mutate
/// in-process state.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub history: Arc<dyn HistoryStore>,
    /// Append chat turns to the history store on the message path
    pub persist_chat: bool,
}

impl AppState {
    pub fn new(
        chat: Arc<ChatService>,
        history: Arc<dyn HistoryStore>,
        persist_chat: bool,
    ) -> Self {
        Self {
            chat,
            history,
            persist_chat,
        }
    }
}
