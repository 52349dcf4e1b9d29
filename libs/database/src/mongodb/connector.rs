use mongodb::{Client, options::ClientOptions};
use tracing::{info, instrument};

use super::{MongoConfig, health::ping};
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Build a client from `config` and verify the server answers a ping.
#[instrument(skip_all, fields(url = %config.redacted_url(), database = %config.database))]
pub async fn connect(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;
    let latency = ping(&client)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(latency_ms = latency.as_millis() as u64, "Connected to MongoDB");
    Ok(client)
}

/// [`connect`], retried with backoff while the server is coming up.
pub async fn connect_with_retry(
    config: &MongoConfig,
    retry: RetryConfig,
) -> DatabaseResult<Client> {
    retry_with_backoff("mongodb connect", &retry, || connect(config)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let config = MongoConfig::new("postgres://localhost:5432", "ecommerce");
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Mongo(_)));
    }

    #[tokio::test]
    async fn test_connect_with_retry_reports_unreachable_server() {
        let mut config = MongoConfig::new("mongodb://127.0.0.1:1/?directConnection=true", "ecommerce");
        config.server_selection_timeout = Duration::from_millis(100);
        config.connect_timeout = Duration::from_millis(100);
        let retry = RetryConfig::default()
            .with_max_retries(1)
            .with_initial_delay(Duration::from_millis(5));

        let err = connect_with_retry(&config, retry).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConnectionFailed(_)));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_local() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = connect(&MongoConfig::new(url, "test")).await;
        assert!(client.is_ok());
    }
}
