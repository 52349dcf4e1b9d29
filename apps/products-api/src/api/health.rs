//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::ping;
use mongodb::Client;

async fn ready(State(client): State<Client>) -> Response {
    let mongodb: HealthCheckFuture = Box::pin(async move {
        ping(&client).await.map(|_| ()).map_err(|e| e.to_string())
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}

/// `GET /ready`: 200 while MongoDB answers a ping, 503 otherwise
pub fn router(client: Client) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ready_reports_unreachable_mongo() {
        // Client construction is lazy; the ping fails fast against a closed port
        let client = Client::with_uri_str(
            "mongodb://127.0.0.1:1/?directConnection=true&serverSelectionTimeoutMS=100",
        )
        .await
        .unwrap();

        let response = router(client)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
    }
}
