use costwatch_defs::{index_mapping, missing_keyword_fields};
use log::{error, info, warn};

use crate::client::DocumentStore;
use crate::storage::StorageManager;

impl<S: DocumentStore> StorageManager<S> {
    /// Creates the event index with its keyword mapping when it does not exist yet. When it
    /// does, the live mapping is checked for the keyword fields the match queries rely on.
    /// Failures are logged only; the process keeps running.
    pub async fn create_index(&self) {
        let exists = match self.store.index_exists(&self.index).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    "Error when trying to check if elasticsearch index {} exists: {}",
                    self.index, e
                );
                return;
            }
        };

        if exists {
            info!("index {} already exists", self.index);
            self.check_index_mapping().await;
            return;
        }

        match self.store.create_index(&self.index, &index_mapping()).await {
            Ok(()) => info!("created elasticsearch index {}", self.index),
            Err(e) => error!(
                "Error when trying to create elasticsearch index {}: {}",
                self.index, e
            ),
        }
    }

    async fn check_index_mapping(&self) {
        let mapping = match self.store.get_mapping(&self.index).await {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!("could not read mapping of index {}: {}", self.index, e);
                return;
            }
        };

        for field in missing_keyword_fields(&mapping) {
            warn!(
                "field {} of index {} is not mapped as keyword, filters on it will not be exact matches",
                field, self.index
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDocumentStore;
    use costwatch_defs::StorageError;
    use serde_json::json;

    #[tokio::test]
    async fn test_existing_index_is_not_recreated() {
        let mut store = MockDocumentStore::new();
        store.expect_index_exists().times(1).returning(|_| Ok(true));
        store.expect_create_index().times(0);
        store
            .expect_get_mapping()
            .times(1)
            .returning(|_| Ok(json!({ "mappings": { "properties": {} } })));

        StorageManager::new(store, "costwatch").create_index().await;
    }

    #[tokio::test]
    async fn test_missing_index_is_created_with_keyword_mapping() {
        let mut store = MockDocumentStore::new();
        store.expect_index_exists().returning(|_| Ok(false));
        store
            .expect_create_index()
            .withf(|index, body| index.to_string() == "costwatch" && *body == index_mapping())
            .times(1)
            .returning(|_, _| Ok(()));

        StorageManager::new(store, "costwatch").create_index().await;
    }

    #[tokio::test]
    async fn test_create_failure_does_not_panic() {
        let mut store = MockDocumentStore::new();
        store.expect_index_exists().returning(|_| Ok(false));
        store
            .expect_create_index()
            .times(1)
            .returning(|_, _| Err(StorageError::Query("resource_already_exists_exception".to_string())));

        StorageManager::new(store, "costwatch").create_index().await;
    }

    #[tokio::test]
    async fn test_existence_check_failure_skips_creation() {
        let mut store = MockDocumentStore::new();
        store
            .expect_index_exists()
            .returning(|_| Err(StorageError::Unreachable("connection refused".to_string())));
        store.expect_create_index().times(0);

        StorageManager::new(store, "costwatch").create_index().await;
    }
}
