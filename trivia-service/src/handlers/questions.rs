//! Question listing, creation and deletion

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    models::NewQuestion,
    pagination::{paginate, Page},
    responses::{categories_of, QuestionCreated, QuestionDeleted, QuestionPage},
    state::AppState,
};

use super::{parse_id, JsonBody};

/// `GET /questions?page=N`
///
/// An empty page is a 404, whether the page is past the end or the store
/// holds no questions at all. `total_questions` is the size of this page.
#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    page: Page,
) -> Result<Json<QuestionPage>> {
    let store = state.store();
    let questions = store.list_questions().await?;

    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(Error::not_found(format!(
            "page {} of {} questions",
            page,
            questions.len()
        )));
    }

    let categories: BTreeMap<i32, String> = store
        .list_categories()
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect();

    Ok(Json(QuestionPage {
        total_questions: current.len(),
        current_category: categories_of(&current),
        questions: current,
        categories,
    }))
}

/// `DELETE /questions/{id}`
///
/// Missing ids are 404; store failures are 422. The re-read after the delete
/// is a separate store call.
#[instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    page: Page,
) -> Result<Json<QuestionDeleted>> {
    let id = parse_id(&raw_id)?;
    let store = state.store();

    if store
        .find_question(id)
        .await
        .map_err(Error::unprocessable)?
        .is_none()
    {
        return Err(Error::not_found(format!("question {}", id)));
    }

    // A concurrent delete may win between the lookup and here
    if !store.delete_question(id).await.map_err(Error::unprocessable)? {
        return Err(Error::not_found(format!("question {}", id)));
    }

    let remaining = store.list_questions().await.map_err(Error::unprocessable)?;
    let total = store.count_questions().await.map_err(Error::unprocessable)?;

    tracing::info!("Deleted question {}", id);
    Ok(Json(QuestionDeleted {
        success: true,
        deleted: id,
        questions: paginate(&remaining, page),
        total_questions: total,
    }))
}

/// `POST /questions`
///
/// Any failure, validation included, is 422.
#[instrument(skip(state, body))]
pub async fn create_question(
    State(state): State<AppState>,
    page: Page,
    JsonBody(body): JsonBody<NewQuestion>,
) -> Result<Json<QuestionCreated>> {
    let store = state.store();

    let created = store
        .insert_question(body)
        .await
        .map_err(Error::unprocessable)?;

    let questions = store.list_questions().await.map_err(Error::unprocessable)?;
    let total = store.count_questions().await.map_err(Error::unprocessable)?;

    tracing::info!(category = ?created.category, "Created question {}", created.id);
    Ok(Json(QuestionCreated {
        success: true,
        created: created.id,
        questions: paginate(&questions, page),
        total_questions: total,
    }))
}
