mod api_executions;
mod api_index;
mod api_resources;
mod api_summary;
mod bootstrap;
mod client;
mod queries;
mod response;
mod storage;

pub use api_executions::{executions_from_aggregation, ExecutionIdBucket, OrderedExecutionIds};
pub use api_summary::merge_latest_status;
pub use bootstrap::{connect, retry_until_deadline};
pub use client::{DocumentStore, ElasticsearchClient};
pub use queries::{
    bool_must, dynamic_match_queries, match_query, ordered_executions_query, resource_cost_query,
    resources_query, status_events_query, SEARCH_PAGE_SIZE,
};
pub use response::{SearchHit, SearchHits, SearchResponse, TotalHits};
pub use storage::StorageManager;
