use std::future::Future;
use std::time::Duration;

use costwatch_defs::{ElasticsearchConfig, StorageError};
use log::{error, info, warn};

use crate::client::ElasticsearchClient;
use crate::storage::StorageManager;

/// Connects to the first healthy endpoint, retrying every `connect_retry_interval_secs`
/// until `connect_deadline_secs` have passed.
pub async fn connect(
    config: &ElasticsearchConfig,
) -> Result<StorageManager<ElasticsearchClient>, StorageError> {
    config.validate()?;

    let client = retry_until_deadline(
        Duration::from_secs(config.connect_retry_interval_secs),
        Duration::from_secs(config.connect_deadline_secs),
        || connect_any_endpoint(config),
    )
    .await?;

    info!("connected to elasticsearch at {}", client.endpoint());
    Ok(StorageManager::new(client, &config.index))
}

async fn connect_any_endpoint(
    config: &ElasticsearchConfig,
) -> Result<ElasticsearchClient, StorageError> {
    let mut last_error = None;

    for endpoint in config.endpoints.iter().filter(|e| !e.trim().is_empty()) {
        let client = ElasticsearchClient::new(endpoint, config)?;
        match client.ping().await {
            Ok(()) => return Ok(client),
            Err(e) => {
                warn!("elasticsearch endpoint {} is not healthy: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| StorageError::Config("no elasticsearch endpoint configured".to_string())))
}

pub async fn retry_until_deadline<T, F, Fut>(
    interval: Duration,
    deadline: Duration,
    mut attempt: F,
) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorageError>>,
{
    let attempts = async {
        loop {
            match attempt().await {
                Ok(value) => return value,
                Err(e) => {
                    warn!(
                        "could not initialize connection to elasticsearch, retrying in {} seconds: {}",
                        interval.as_secs(),
                        e
                    );
                    tokio::time::sleep(interval).await;
                }
            }
        }
    };

    tokio::time::timeout(deadline, attempts).await.map_err(|_| {
        error!(
            "could not connect elasticsearch, timed out after {} seconds",
            deadline.as_secs()
        );
        StorageError::ConnectionTimeout(deadline.as_secs())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result = retry_until_deadline(
            Duration::from_secs(5),
            Duration::from_secs(60),
            move || {
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 2 {
                        Err(StorageError::Unreachable("connection refused".to_string()))
                    } else {
                        Ok(attempt)
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_deadline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let started = tokio::time::Instant::now();

        let result: Result<(), StorageError> = retry_until_deadline(
            Duration::from_secs(5),
            Duration::from_secs(60),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(StorageError::Unreachable("connection refused".to_string())) }
            },
        )
        .await;

        assert!(matches!(result, Err(StorageError::ConnectionTimeout(60))));
        assert_eq!(started.elapsed(), Duration::from_secs(60));
        // first attempt is immediate, then one every 5 seconds
        assert!(calls.load(Ordering::SeqCst) >= 12);
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let config = ElasticsearchConfig {
            endpoints: vec![],
            username: String::new(),
            password: String::new(),
            index: "costwatch".to_string(),
            request_timeout_secs: 1,
            connect_retry_interval_secs: 1,
            connect_deadline_secs: 1,
        };
        assert!(matches!(
            connect(&config).await,
            Err(StorageError::Config(_))
        ));
    }
}
