use std::time::Duration;

use async_trait::async_trait;
use costwatch_defs::{ElasticsearchConfig, StorageError};
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::response::SearchResponse;

/// The operations this system needs from the document store. Implementations must be
/// safe to share between concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, StorageError>;
    async fn index_document(&self, index: &str, document: &Value) -> Result<(), StorageError>;
    async fn index_exists(&self, index: &str) -> Result<bool, StorageError>;
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), StorageError>;
    /// Returns `{"mappings": {...}}` for the given index.
    async fn get_mapping(&self, index: &str) -> Result<Value, StorageError>;
}

#[derive(Clone, Debug)]
pub struct ElasticsearchClient {
    http: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl ElasticsearchClient {
    pub fn new(endpoint: &str, config: &ElasticsearchConfig) -> Result<Self, StorageError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| StorageError::Unreachable(format!("failed to build http client: {}", e)))?;

        Ok(ElasticsearchClient {
            http,
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Cluster health probe used while bootstrapping the connection.
    pub async fn ping(&self) -> Result<(), StorageError> {
        let response = self.send(self.request(Method::GET, "")).await?;
        check_status(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.endpoint, path.trim_start_matches('/'));
        let request = self
            .http
            .request(method, &url)
            .header("Content-Type", "application/json");

        if self.username.is_empty() {
            request
        } else {
            request.basic_auth(&self.username, Some(&self.password))
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        request
            .send()
            .await
            .map_err(|e| StorageError::Unreachable(format!("{}: {}", self.endpoint, e)))
    }
}

async fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_body = response.text().await.unwrap_or_default();
    Err(StorageError::Query(format!(
        "request failed with status {}: {}",
        status, error_body
    )))
}

#[async_trait]
impl DocumentStore for ElasticsearchClient {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, StorageError> {
        debug!("POST {}/_search: {}", index, body);
        let response = self
            .send(self.request(Method::POST, &format!("{}/_search", index)).json(body))
            .await?;
        let response = check_status(response).await?;

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| StorageError::Decode(format!("search response: {}", e)))
    }

    async fn index_document(&self, index: &str, document: &Value) -> Result<(), StorageError> {
        let response = self
            .send(self.request(Method::POST, &format!("{}/_doc", index)).json(document))
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, StorageError> {
        let response = self.send(self.request(Method::HEAD, index)).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StorageError::Query(format!(
                "index existence check returned status {}",
                status
            ))),
        }
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), StorageError> {
        let response = self
            .send(self.request(Method::PUT, index).json(body))
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn get_mapping(&self, index: &str) -> Result<Value, StorageError> {
        let response = self
            .send(self.request(Method::GET, &format!("{}/_mapping", index)))
            .await?;
        let response = check_status(response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| StorageError::Decode(format!("mapping response: {}", e)))?;

        // The response is keyed by the concrete index name, which differs from the
        // requested name when an alias is used.
        body.get(index)
            .or_else(|| body.as_object().and_then(|m| m.values().next()))
            .cloned()
            .ok_or_else(|| StorageError::Decode(format!("no mapping returned for index {}", index)))
    }
}
