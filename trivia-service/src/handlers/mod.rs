//! Endpoint handlers
//!
//! Each handler is a single async function taking [`State<AppState>`],
//! optional path and body extractors and the [`Page`](crate::pagination::Page)
//! extractor, and returning `Result<Json<_>>`. Store failures on mutating or
//! lookup-dependent endpoints become 422 through [`Error::unprocessable`];
//! list endpoints let them escape as 500.
//!
//! [`State<AppState>`]: axum::extract::State

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::Error;

pub mod categories;
pub mod questions;
pub mod search;

pub use categories::{list_categories, questions_by_category};
pub use questions::{create_question, delete_question, list_questions};
pub use search::{search_questions, SearchRequest};

/// JSON request body rendered with the service error envelope on rejection
///
/// Syntax errors, a missing `Content-Type: application/json` and unreadable
/// bodies are 400. Well-formed JSON with wrongly typed fields is 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(classify_rejection(rejection)),
        }
    }
}

fn classify_rejection(rejection: JsonRejection) -> Error {
    match rejection {
        JsonRejection::JsonDataError(e) => Error::unprocessable(e.body_text()),
        other => Error::BadRequest(other.body_text()),
    }
}

/// Parse a path id the way an integer route converter would
///
/// Anything other than plain ASCII digits that fit in an `i32` does not
/// name a resource, so it is a 404.
pub fn parse_id(raw: &str) -> Result<i32, Error> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::not_found(format!("no resource with id {:?}", raw)));
    }
    raw.parse()
        .map_err(|_| Error::not_found(format!("id {} is out of range", raw)))
}


#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id("007").unwrap(), 7);

        for raw in ["", "abc", "-1", "+1", "1.5", " 1", "99999999999"] {
            let error = parse_id(raw).unwrap_err();
            assert_eq!(error.status(), StatusCode::NOT_FOUND, "{:?}", raw);
        }
    }
}
