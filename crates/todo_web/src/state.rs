//! Shared state handed to every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::completion::CompletionClient;
use crate::store::TodoStore;

const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct AppState {
    pub store: TodoStore,
    pub completion: Arc<dyn CompletionClient>,
    /// How long the page waits for the list before rendering the loading view.
    pub list_timeout: Duration,
}

impl AppState {
    pub fn new(store: TodoStore, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            store,
            completion,
            list_timeout: DEFAULT_LIST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_list_timeout(mut self, list_timeout: Duration) -> Self {
        self.list_timeout = list_timeout;
        self
    }
}
