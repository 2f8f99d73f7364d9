use serde::{Deserialize, Serialize};

use crate::StorageError;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct StorageConfig {
    pub elasticsearch: ElasticsearchConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ElasticsearchConfig {
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub index: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_retry_interval_secs")]
    pub connect_retry_interval_secs: u64,
    #[serde(default = "default_connect_deadline_secs")]
    pub connect_deadline_secs: u64,
}

fn default_port() -> u16 {
    8081
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_retry_interval_secs() -> u64 {
    5
}

fn default_connect_deadline_secs() -> u64 {
    60
}

impl ElasticsearchConfig {
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.endpoints.iter().all(|e| e.trim().is_empty()) {
            return Err(StorageError::Config(
                "at least one elasticsearch endpoint is required".to_string(),
            ));
        }
        if self.index.trim().is_empty() {
            return Err(StorageError::Config(
                "elasticsearch index name must not be empty".to_string(),
            ));
        }
        if self.connect_retry_interval_secs == 0 {
            return Err(StorageError::Config(
                "connect_retry_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
