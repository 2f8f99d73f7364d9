use serde::{Deserialize, Serialize};

use crate::EventDocument;

/// Per-resource view of one execution: the newest status plus the cost of what was detected.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CollectorsSummary {
    pub resource_name: String,
    pub resource_count: i64,
    pub total_spent: f64,
    pub status: i64,
    pub error_message: String,
    pub event_time: i64,
}

impl CollectorsSummary {
    pub fn from_status_event(event: &EventDocument) -> Self {
        CollectorsSummary {
            resource_name: event.resource_name.clone(),
            resource_count: 0,
            total_spent: 0.0,
            status: event.data.status,
            error_message: event.data.error_message.clone().unwrap_or_default(),
            event_time: event.event_time,
        }
    }
}
