use mongodb::{Client, bson::doc};
use std::time::{Duration, Instant};

/// Round-trip a `ping` command against the admin database.
pub async fn ping(client: &Client) -> Result<Duration, mongodb::error::Error> {
    let start = Instant::now();
    client.database("admin").run_command(doc! { "ping": 1 }).await?;
    Ok(start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping_fails_for_unreachable_server() {
        let client = Client::with_uri_str(
            "mongodb://127.0.0.1:1/?directConnection=true&serverSelectionTimeoutMS=100",
        )
        .await
        .unwrap();
        assert!(ping(&client).await.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_ping_local_server() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(ping(&client).await.is_ok());
    }
}
