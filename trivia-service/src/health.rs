//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::AppState;

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy`
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Body of `GET /ready`
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `true` when every dependency is healthy
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses, keyed by dependency name
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Health of one dependency
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Backend serving the dependency
    pub backend: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe
///
/// Always 200 while the process is serving requests.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe
///
/// 200 when the store answers a ping, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store();

    let status = match store.ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            backend: store.backend().to_string(),
            message: Some("Reachable".to_string()),
        },
        Err(e) => {
            tracing::error!(
                operation = %e.operation,
                kind = %e.kind,
                "Store health check failed: {}", e.message
            );
            DependencyStatus {
                healthy: false,
                backend: store.backend().to_string(),
                message: Some(format!("Ping failed: {}", e.message)),
            }
        }
    };

    let ready = status.healthy;
    let response = ReadinessResponse {
        ready,
        service: state.config().service.name.clone(),
        dependencies: HashMap::from([("store".to_string(), status)]),
    };

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, store::MemoryStore};
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(Config::default(), Arc::new(MemoryStore::new()))
    }

    async fn json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = json(health(State(state())).await.into_response()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "trivia-service");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_with_memory_store() {
        let (status, body) = json(readiness(State(state())).await.into_response()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
        assert_eq!(body["dependencies"]["store"]["backend"], "memory");
    }
}
