use costwatch_defs::StorageError;
use log::{debug, error};
use serde_json::{Map, Value};

use crate::client::DocumentStore;
use crate::queries::resources_query;
use crate::storage::StorageManager;

impl<S: DocumentStore> StorageManager<S> {
    /// Raw detected-resource documents of one type in one execution, returned exactly as
    /// the collector stored them.
    pub async fn get_resources(
        &self,
        resource_type: &str,
        execution_id: &str,
    ) -> Result<Vec<Map<String, Value>>, StorageError> {
        let response = self
            .store
            .search(&self.index, &resources_query(resource_type, execution_id))
            .await
            .map_err(|e| {
                error!(
                    "elasticsearch query error for resource {} in execution {}: {}",
                    resource_type, execution_id, e
                );
                e
            })?;

        debug!(
            "get resources {} for execution {} took {}ms",
            resource_type, execution_id, response.took
        );

        let resources = response
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| match hit.source {
                Value::Object(document) => Some(document),
                other => {
                    error!(
                        "error when trying to parse search result hit {}: expected an object, got {}",
                        hit.id, other
                    );
                    None
                }
            })
            .collect();

        Ok(resources)
    }
}
