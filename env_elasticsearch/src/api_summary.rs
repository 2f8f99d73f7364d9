use std::collections::HashMap;

use costwatch_defs::{CollectorsSummary, EventDocument, StorageError, FIELD_RESOURCE_NAME};
use log::{debug, error};

use crate::client::DocumentStore;
use crate::queries::{resource_cost_query, status_events_query, SUM_AGGREGATION};
use crate::storage::StorageManager;

/// Keeps the newest status event per resource name. On equal event times the
/// later-seen event wins.
pub fn merge_latest_status<I>(events: I) -> HashMap<String, CollectorsSummary>
where
    I: IntoIterator<Item = EventDocument>,
{
    let mut summary: HashMap<String, CollectorsSummary> = HashMap::new();

    for event in events {
        if let Some(existing) = summary.get(&event.resource_name) {
            if event.event_time < existing.event_time {
                continue;
            }
        }
        summary.insert(
            event.resource_name.clone(),
            CollectorsSummary::from_status_event(&event),
        );
    }

    summary
}

impl<S: DocumentStore> StorageManager<S> {
    /// Latest status per resource for one execution, enriched with total monthly spend and
    /// detected resource count. A failing cost lookup leaves that resource at zero instead
    /// of failing the whole summary.
    pub async fn get_summary(
        &self,
        execution_id: &str,
        filters: &HashMap<String, String>,
    ) -> Result<HashMap<String, CollectorsSummary>, StorageError> {
        debug!(
            "Going to get summary for execution {} with filters {:?}",
            execution_id, filters
        );

        let response = self
            .store
            .search(&self.index, &status_events_query(execution_id))
            .await
            .map_err(|e| {
                error!(
                    "error when trying to get summary data for execution {}: {}",
                    execution_id, e
                );
                e
            })?;

        debug!(
            "get summary status events took {}ms, {} hits",
            response.took,
            response.hits.hits.len()
        );

        let events = response.hits.hits.into_iter().filter_map(|hit| {
            match serde_json::from_value::<EventDocument>(hit.source) {
                Ok(event) => Some(event),
                Err(e) => {
                    error!("could not parse summary row {}: {}", hit.id, e);
                    None
                }
            }
        });
        let mut summary = merge_latest_status(events);

        for (resource_name, row) in summary.iter_mut() {
            let mut resource_filters = filters.clone();
            resource_filters.insert(FIELD_RESOURCE_NAME.to_string(), resource_name.clone());

            match self
                .get_resource_summary_details(execution_id, &resource_filters)
                .await
            {
                Ok((total_spent, resource_count)) => {
                    row.total_spent = total_spent;
                    row.resource_count = resource_count;
                }
                Err(e) => {
                    error!(
                        "error when trying to get summary details with filters {:?}: {}",
                        resource_filters, e
                    );
                }
            }
        }

        Ok(summary)
    }

    /// Returns (total spent, resource count) for the detected resources matching the filters.
    async fn get_resource_summary_details(
        &self,
        execution_id: &str,
        filters: &HashMap<String, String>,
    ) -> Result<(f64, i64), StorageError> {
        let response = self
            .store
            .search(&self.index, &resource_cost_query(execution_id, filters))
            .await?;

        debug!(
            "get execution details with filters {:?} took {}ms",
            filters, response.took
        );

        let sum = response
            .aggregation(SUM_AGGREGATION)
            .ok_or_else(|| StorageError::Decode("sum aggregation is missing".to_string()))?;
        // Elasticsearch reports null for a sum over no documents on some versions
        let total_spent = sum.get("value").and_then(|v| v.as_f64()).unwrap_or(0.0);

        Ok((total_spent, response.total_hits()))
    }
}
