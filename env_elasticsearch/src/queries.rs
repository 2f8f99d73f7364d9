use std::collections::HashMap;

use costwatch_defs::{
    EventType, FIELD_EVENT_TIME, FIELD_EVENT_TYPE, FIELD_EXECUTION_ID, FIELD_PRICE_PER_MONTH,
    FIELD_RESOURCE_NAME,
};
use serde_json::{json, Map, Value};

/// Hard cap on returned documents per search. There is no cursor, anything past it is dropped.
pub const SEARCH_PAGE_SIZE: usize = 100;

pub const SUM_AGGREGATION: &str = "sum";
pub const ORDERED_EXECUTIONS_AGGREGATION: &str = "orderedExecutionID";
pub const EXECUTION_ID_DESC_AGGREGATION: &str = "ExecutionIDDesc";
pub const MAX_EVENT_TIME_AGGREGATION: &str = "MaxEventTime";

pub fn match_query(field: &str, value: &str) -> Value {
    let mut condition = Map::new();
    condition.insert(field.to_string(), Value::String(value.to_string()));
    json!({ "match": condition })
}

/// One match condition per filter entry. Field names are not validated, an unknown
/// field simply matches nothing.
pub fn dynamic_match_queries(filters: &HashMap<String, String>) -> Vec<Value> {
    filters
        .iter()
        .map(|(name, value)| match_query(name, value))
        .collect()
}

pub fn bool_must(conditions: Vec<Value>) -> Value {
    json!({
        "bool": {
            "must": conditions
        }
    })
}

pub fn status_events_query(execution_id: &str) -> Value {
    json!({
        "query": bool_must(vec![
            match_query(FIELD_EVENT_TYPE, EventType::ServiceStatus.as_str()),
            match_query(FIELD_EXECUTION_ID, execution_id),
        ]),
        "size": SEARCH_PAGE_SIZE
    })
}

/// Aggregation-only query: the summed monthly price comes back in the `sum` aggregation
/// and the number of detected resources is the total hit count.
pub fn resource_cost_query(execution_id: &str, filters: &HashMap<String, String>) -> Value {
    let mut conditions = dynamic_match_queries(filters);
    conditions.push(match_query(FIELD_EXECUTION_ID, execution_id));
    conditions.push(match_query(
        FIELD_EVENT_TYPE,
        EventType::ResourceDetected.as_str(),
    ));

    json!({
        "query": bool_must(conditions),
        "size": 0,
        "track_total_hits": true,
        "aggs": {
            SUM_AGGREGATION: {
                "sum": { "field": FIELD_PRICE_PER_MONTH }
            }
        }
    })
}

/// Distinct execution ids of status events, newest first by their latest event time.
pub fn ordered_executions_query(limit: usize) -> Value {
    json!({
        "size": 0,
        "aggs": {
            ORDERED_EXECUTIONS_AGGREGATION: {
                "filters": {
                    "filters": [
                        match_query(FIELD_EVENT_TYPE, EventType::ServiceStatus.as_str())
                    ]
                },
                "aggs": {
                    EXECUTION_ID_DESC_AGGREGATION: {
                        "terms": {
                            "field": FIELD_EXECUTION_ID,
                            "size": limit,
                            "order": { MAX_EVENT_TIME_AGGREGATION: "desc" }
                        },
                        "aggs": {
                            MAX_EVENT_TIME_AGGREGATION: {
                                "max": { "field": FIELD_EVENT_TIME }
                            }
                        }
                    }
                }
            }
        }
    })
}

pub fn resources_query(resource_type: &str, execution_id: &str) -> Value {
    json!({
        "query": bool_must(vec![
            match_query(FIELD_EVENT_TYPE, EventType::ResourceDetected.as_str()),
            match_query(FIELD_EXECUTION_ID, execution_id),
            match_query(FIELD_RESOURCE_NAME, resource_type),
        ]),
        "size": SEARCH_PAGE_SIZE
    })
}
