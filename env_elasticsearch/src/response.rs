use serde::Deserialize;
use serde_json::{Map, Value};

/// The parts of an Elasticsearch `_search` response this crate reads.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub hits: SearchHits,
    #[serde(default)]
    pub aggregations: Option<Map<String, Value>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchHits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TotalHits {
    pub value: i64,
    #[serde(default)]
    pub relation: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl SearchResponse {
    pub fn total_hits(&self) -> i64 {
        self.hits.total.as_ref().map(|t| t.value).unwrap_or(0)
    }

    pub fn aggregation(&self, name: &str) -> Option<&Value> {
        self.aggregations.as_ref().and_then(|aggs| aggs.get(name))
    }
}
