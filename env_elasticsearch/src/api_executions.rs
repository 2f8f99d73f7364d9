use costwatch_defs::{parse_execution_id, Execution};
use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

use crate::client::DocumentStore;
use crate::queries::{
    ordered_executions_query, EXECUTION_ID_DESC_AGGREGATION, ORDERED_EXECUTIONS_AGGREGATION,
};
use crate::storage::StorageManager;

/// Inner terms aggregation of one outer bucket: the distinct execution ids, already
/// ordered by the store.
#[derive(Deserialize, Debug, Default)]
pub struct OrderedExecutionIds {
    #[serde(default)]
    pub buckets: Vec<ExecutionIdBucket>,
}

#[derive(Deserialize, Debug)]
pub struct ExecutionIdBucket {
    pub key: String,
}

/// Decodes the bucket-of-buckets payload of the ordered executions aggregation. Buckets
/// and execution ids that cannot be decoded are logged and skipped.
pub fn executions_from_aggregation(aggregation: &Value) -> Vec<Execution> {
    let outer_buckets: Vec<&Value> = match aggregation.get("buckets") {
        Some(Value::Array(buckets)) => buckets.iter().collect(),
        Some(Value::Object(buckets)) => buckets.values().collect(),
        _ => {
            error!("{} aggregation has no buckets", ORDERED_EXECUTIONS_AGGREGATION);
            return vec![];
        }
    };

    let mut executions = Vec::new();
    for bucket in outer_buckets {
        let Some(inner) = bucket.get(EXECUTION_ID_DESC_AGGREGATION) else {
            error!(
                "bucket is missing the {} aggregation",
                EXECUTION_ID_DESC_AGGREGATION
            );
            continue;
        };
        let execution_ids = match OrderedExecutionIds::deserialize(inner) {
            Ok(ids) => ids,
            Err(e) => {
                error!("error when trying to parse bucket aggregations execution ids: {}", e);
                continue;
            }
        };

        for bucket in execution_ids.buckets {
            match parse_execution_id(&bucket.key) {
                Ok(execution) => executions.push(execution),
                Err(e) => error!("could not parse collector execution time: {}", e),
            }
        }
    }
    executions
}

impl<S: DocumentStore> StorageManager<S> {
    /// Up to `limit` collector executions, most recent first. Store failures are logged and
    /// reported as "no executions yet" so pollers are never blocked.
    pub async fn get_executions(&self, limit: usize) -> Vec<Execution> {
        if limit == 0 {
            return vec![];
        }

        let response = match self
            .store
            .search(&self.index, &ordered_executions_query(limit))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("error when trying to get executions collectors: {}", e);
                return vec![];
            }
        };

        debug!("get executions took {}ms", response.took);

        match response.aggregation(ORDERED_EXECUTIONS_AGGREGATION) {
            Some(aggregation) => executions_from_aggregation(aggregation),
            None => {
                error!(
                    "{} field term does not exist",
                    ORDERED_EXECUTIONS_AGGREGATION
                );
                vec![]
            }
        }
    }
}
