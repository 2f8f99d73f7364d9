mod config;
mod errors;
mod event;
mod execution;
mod mapping;
mod summary;

pub use config::{ApiConfig, ElasticsearchConfig, StorageConfig};
pub use errors::StorageError;
pub use event::{EventData, EventDocument, EventType};
pub use execution::{parse_execution_id, Execution};
pub use mapping::{
    index_mapping, missing_keyword_fields, FIELD_EVENT_TIME, FIELD_EVENT_TYPE, FIELD_EXECUTION_ID,
    FIELD_PRICE_PER_MONTH, FIELD_RESOURCE_NAME, KEYWORD_FIELDS,
};
pub use summary::CollectorsSummary;
