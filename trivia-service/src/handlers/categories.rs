//! Category handlers

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    pagination::{paginate, Page},
    responses::{CategoryList, CategoryQuestions},
    state::AppState,
    store::QuestionFilter,
};

use super::parse_id;

/// `GET /categories`
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoryList>> {
    let categories = state.store().list_categories().await?;

    tracing::debug!("Listed {} categories", categories.len());
    Ok(Json(CategoryList {
        categories: categories.into_iter().map(|c| c.kind).collect(),
    }))
}

/// `GET /categories/{id}/questions`
///
/// An id with no category row is 422, not 404; clients rely on the split.
#[instrument(skip(state))]
pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    page: Page,
) -> Result<Json<CategoryQuestions>> {
    let id = parse_id(&raw_id)?;
    let store = state.store();

    let category = store
        .find_category(id)
        .await
        .map_err(Error::unprocessable)?
        .ok_or_else(|| Error::unprocessable(format!("category {} does not exist", id)))?;

    let questions = store
        .find_questions(&QuestionFilter::Category(id.to_string()))
        .await
        .map_err(Error::unprocessable)?;

    tracing::info!(
        "Found {} questions in category {} ({})",
        questions.len(),
        id,
        category.kind
    );

    Ok(Json(CategoryQuestions {
        success: true,
        questions: paginate(&questions, page),
        total_questions: questions.len(),
        current_category: category.kind,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{Method, StatusCode};
    use serde_json::json;

    use crate::handlers::testing::{app_with, assert_envelope, call, seeded_app, FailingStore};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_list_categories_in_id_order() {
        let (app, _) = seeded_app();
        let (status, body) = call(&app, Method::GET, "/categories", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "categories": ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
            })
        );
    }

    #[tokio::test]
    async fn test_list_categories_empty_store() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, body) = call(&app, Method::GET, "/categories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "categories": [] }));
    }

    #[tokio::test]
    async fn test_list_categories_store_down_is_500() {
        let app = app_with(Arc::new(FailingStore));
        let (status, body) = call(&app, Method::GET, "/categories", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_envelope(&body, 500, "internal server error");
    }

    #[tokio::test]
    async fn test_questions_by_category() {
        let (app, store) = seeded_app();
        let expected: Vec<_> = {
            use crate::store::{QuestionFilter, TriviaStore};
            store
                .find_questions(&QuestionFilter::Category("1".to_string()))
                .await
                .unwrap()
        };
        assert!(!expected.is_empty());

        let (status, body) = call(&app, Method::GET, "/categories/1/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Success"], true);
        assert!(body.get("success").is_none());
        assert_eq!(body["current_category"], "Science");
        assert_eq!(body["total_questions"], expected.len());

        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), expected.len().min(10));
        assert!(questions.iter().all(|q| q["category"] == "1"));
    }

    #[tokio::test]
    async fn test_questions_by_category_empty_category_succeeds() {
        let store = MemoryStore::with_categories([crate::models::Category::new(9, "Music")]);
        let app = app_with(Arc::new(store));

        let (status, body) = call(&app, Method::GET, "/categories/9/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_questions"], 0);
        assert_eq!(body["questions"], json!([]));
        assert_eq!(body["current_category"], "Music");
    }

    #[tokio::test]
    async fn test_unknown_category_is_unprocessable() {
        let (app, _) = seeded_app();
        let (status, body) = call(&app, Method::GET, "/categories/1000/questions", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_envelope(&body, 422, "unprocessable");
    }

    #[tokio::test]
    async fn test_non_integer_category_id_is_not_found() {
        let (app, _) = seeded_app();
        let (status, body) = call(&app, Method::GET, "/categories/science/questions", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_envelope(&body, 404, "resource not found");
    }

    #[tokio::test]
    async fn test_questions_by_category_store_down_is_unprocessable() {
        let app = app_with(Arc::new(FailingStore));
        let (status, _) = call(&app, Method::GET, "/categories/1/questions", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
