//! Substring search over question text

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    pagination::{paginate, Page},
    responses::{categories_of, SearchResults},
    state::AppState,
    store::QuestionFilter,
};

use super::JsonBody;

/// Body of `POST /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Missing or `null` matches every question
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// `POST /search`
///
/// Matches are paginated, but `total_questions` and `current_category`
/// describe the full match set.
#[instrument(skip(state))]
pub async fn search_questions(
    State(state): State<AppState>,
    page: Page,
    JsonBody(body): JsonBody<SearchRequest>,
) -> Result<Json<SearchResults>> {
    let term = body.search_term.unwrap_or_default();

    let matches = state
        .store()
        .find_questions(&QuestionFilter::QuestionContains(term))
        .await
        .map_err(Error::unprocessable)?;

    tracing::debug!("Search matched {} questions", matches.len());
    Ok(Json(SearchResults {
        success: true,
        questions: paginate(&matches, page),
        total_questions: matches.len(),
        current_category: categories_of(&matches),
    }))
}
