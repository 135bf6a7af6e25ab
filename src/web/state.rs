use crate::{config::TableConfig, store::Store};

use std::sync::Arc;

/// Everything a handler is given: the key names and the store they apply to.
/// Nothing in here changes between requests.
#[derive(Clone)]
pub struct AppState {
    config: Arc<TableConfig>,
    store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            config: Arc::new(store.config().clone()),
            store,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
