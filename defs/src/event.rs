use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    #[serde(rename = "service_status")]
    ServiceStatus,
    #[serde(rename = "resource_detected")]
    ResourceDetected,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ServiceStatus => "service_status",
            EventType::ResourceDetected => "resource_detected",
        }
    }
}

/// A single record written by a collector run. Documents are never updated once stored.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EventDocument {
    pub resource_name: String,
    #[serde(rename = "ExecutionID")]
    pub execution_id: String,
    pub event_type: EventType,
    /// Unix seconds
    pub event_time: i64,
    #[serde(default)]
    pub data: EventData,
}

/// Open-ended payload. Only the fields read by the summary view are typed,
/// everything else the collector sends is kept in `extra`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EventData {
    #[serde(default)]
    pub status: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_month: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
