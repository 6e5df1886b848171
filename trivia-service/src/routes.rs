//! HTTP routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/categories` | [`list_categories`] |
//! | GET | `/categories/{id}/questions` | [`questions_by_category`] |
//! | GET | `/questions?page=N` | [`list_questions`] |
//! | POST | `/questions` | [`create_question`] |
//! | DELETE | `/questions/{id}` | [`delete_question`] |
//! | POST | `/search` | [`search_questions`] |
//! | GET | `/health`, `/ready` | liveness and readiness probes |
//!
//! Unknown paths render the 404 envelope; known paths with an unsupported
//! method render the 405 envelope.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{
    error::Error,
    handlers::{
        create_question, delete_question, list_categories, list_questions,
        questions_by_category, search_questions,
    },
    health::{health, readiness},
    state::AppState,
};

/// Build the application router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_by_category))
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/search", post(search_questions))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn not_found() -> Error {
    Error::not_found("no route")
}

async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
