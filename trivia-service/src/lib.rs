//! # trivia-service
//!
//! HTTP API over a trivia question bank: paginated listing, creation,
//! deletion, case-insensitive search and per-category browsing of questions.
//!
//! ## Features
//!
//! - **Six JSON endpoints** under `/categories`, `/questions` and `/search`
//! - **Pluggable store**: in-memory (seeded with sample data) or PostgreSQL via sqlx
//! - **Middleware stack**: CORS, request tracking, panic recovery, body size limits, timeouts
//! - **Observability**: structured tracing with JSON or pretty output
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: SIGTERM and SIGINT handling
//!
//! ## Example
//!
//! ```rust,no_run
//! use trivia_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::from_config(config.clone()).await?;
//!
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod pagination;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

#[cfg(feature = "postgres")]
pub mod database;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, StoreBackend};
    pub use crate::error::{Error, Result};
    pub use crate::health::{health, readiness};
    pub use crate::models::{Category, NewQuestion, Question};
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{paginate, Page, QUESTIONS_PER_PAGE};
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::store::{MemoryStore, QuestionFilter, StoreError, TriviaStore};

    #[cfg(feature = "postgres")]
    pub use crate::store::PgStore;
}
