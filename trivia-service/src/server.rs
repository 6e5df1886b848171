//! HTTP server with graceful shutdown

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

#[cfg(feature = "postgres")]
use crate::database::sanitize_connection_url;
use crate::{
    config::Config,
    error::Result,
    middleware::{
        cors_layer, request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
    },
};

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Wrap `app` in the configured middleware stack
    ///
    /// Layers added later run first, so CORS is outermost and panic
    /// recovery sits closest to the handlers. Request ids are assigned and
    /// credential headers masked before the trace layer sees the request.
    pub fn apply_middleware(&self, app: Router) -> Router {
        let middleware = &self.config.middleware;
        let body_limit = middleware.body_limit_mb.saturating_mul(1024 * 1024);

        let app = if middleware.catch_panic {
            app.layer(CatchPanicLayer::new())
        } else {
            app
        };

        let app = app
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            .layer(sensitive_headers_layer())
            .layer(request_id_propagation_layer())
            .layer(request_id_layer())
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(TimeoutLayer::with_status_code(
                http::StatusCode::REQUEST_TIMEOUT,
                self.config.service.timeout(),
            ));

        let app = if middleware.compression {
            app.layer(CompressionLayer::new())
        } else {
            app
        };

        app.layer(cors_layer(&middleware.cors_mode))
    }

    /// Run the server with the given router
    pub async fn serve(self, app: Router) -> Result<()> {
        let service = &self.config.service;
        let app = self.apply_middleware(app);

        self.log_middleware_config();

        let listener = TcpListener::bind((service.host.as_str(), service.port)).await?;
        let addr = listener.local_addr()?;

        tracing::info!("{} listening on {}", service.name, addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Log the effective middleware and store configuration
    fn log_middleware_config(&self) {
        let middleware = &self.config.middleware;
        let enabled = |on: bool| if on { "enabled" } else { "disabled" };

        tracing::info!("Middleware configuration:");
        tracing::info!("  - Panic recovery: {}", enabled(middleware.catch_panic));
        tracing::info!("  - Request ID tracking: enabled");
        tracing::info!("  - Sensitive header masking: enabled");
        tracing::info!("  - Request body limit: {} MB", middleware.body_limit_mb);
        tracing::info!("  - Compression: {}", enabled(middleware.compression));
        tracing::info!("  - CORS mode: {}", middleware.cors_mode);
        tracing::info!(
            "  - Request timeout: {} seconds",
            self.config.service.timeout_secs
        );

        tracing::info!("Store backend: {:?}", self.config.store.backend);
        #[cfg(feature = "postgres")]
        {
            if let Some(url) = self.config.database_url() {
                tracing::info!("  - Database: {}", sanitize_connection_url(url));
            }
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Wait for SIGINT or SIGTERM
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, Method, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::{routes, state::AppState, store::MemoryStore};

    fn app(config: Config) -> Router {
        let state = AppState::new(config.clone(), Arc::new(MemoryStore::seeded().unwrap()));
        Server::new(config).apply_middleware(routes::router(state))
    }

    #[tokio::test]
    async fn test_stack_adds_cors_and_request_id() {
        let response = app(Config::default())
            .oneshot(
                Request::builder()
                    .uri("/categories")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_stack_echoes_incoming_request_id() {
        let response = app(Config::default())
            .oneshot(
                Request::builder()
                    .uri("/questions")
                    .header("x-request-id", "trivia-req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get("x-request-id").unwrap(), "trivia-req-42");
    }

    #[tokio::test]
    async fn test_stack_generates_request_id_on_errors() {
        let response = app(Config::default())
            .oneshot(Request::builder().uri("/quizzes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let id = response.headers().get("x-request-id").unwrap();
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_huge_body_limit_does_not_overflow() {
        let mut config = Config::default();
        config.middleware.body_limit_mb = usize::MAX;

        let response = app(config)
            .oneshot(Request::builder().uri("/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stack_rejects_oversized_body() {
        let mut config = Config::default();
        config.middleware.body_limit_mb = 1;
        let body = format!("{{\"searchTerm\": \"{}\"}}", "a".repeat(2 * 1024 * 1024));
        let length = body.len();

        let response = app(config)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/search")
                    .header("content-type", "application/json")
                    .header("content-length", length)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_preflight_allows_delete() {
        let response = app(Config::default())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/questions/1")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let methods = response
            .headers()
            .get("access-control-allow-methods")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("DELETE"));
    }
}
