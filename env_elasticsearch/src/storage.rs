use costwatch_defs::StorageError;
use log::error;
use serde_json::Value;

use crate::client::DocumentStore;

/// Entry point for every read and write against the event index.
pub struct StorageManager<S> {
    pub(crate) store: S,
    pub(crate) index: String,
}

impl<S: DocumentStore> StorageManager<S> {
    pub fn new(store: S, index: &str) -> Self {
        StorageManager {
            store,
            index: index.to_string(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Indexes a single event document. No batching and no retry.
    pub async fn save(&self, document: &Value) -> Result<(), StorageError> {
        if let Err(e) = self.store.index_document(&self.index, document).await {
            error!(
                "Fail to save document in index {}: {} (document: {})",
                self.index, e, document
            );
            return Err(e);
        }
        Ok(())
    }
}
