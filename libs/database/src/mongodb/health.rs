use mongodb::{Client, bson::doc};
use std::time::Instant;

/// Result of a readiness check
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// `true` when the server answers a `ping`.
pub async fn check_health(client: &Client) -> bool {
    check_health_detailed(client).await.healthy
}

/// Ping the `admin` database and time the round trip.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client.database("admin").run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(error = %e, "MongoDB health check failed");
            HealthStatus {
                healthy: false,
                message: Some(e.to_string()),
                response_time_ms,
            }
        }
    }
}
