//! Response bodies for the question service endpoints
//!
//! Field names are part of the client contract and are serialized exactly as
//! declared, including `total_questions` meaning different things on
//! different endpoints and the capitalised `Success` key on
//! `GET /categories/{id}/questions`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Question;

/// `GET /categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
    /// Display labels ordered by category id
    pub categories: Vec<String>,
}

/// `GET /questions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,

    /// Number of questions on this page, not the overall total.
    /// Clients built against this endpoint read it that way.
    pub total_questions: usize,

    /// Category id to display label, for every category
    pub categories: BTreeMap<i32, String>,

    /// Category of each question on this page, in page order
    pub current_category: Vec<Option<String>>,
}

/// `DELETE /questions/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDeleted {
    pub success: bool,
    pub deleted: i32,
    pub questions: Vec<Question>,
    /// Questions remaining in the store
    pub total_questions: u64,
}

/// `POST /questions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCreated {
    pub success: bool,
    pub created: i32,
    pub questions: Vec<Question>,
    /// Questions in the store after the insert
    pub total_questions: u64,
}

/// `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<Question>,
    /// Every match, not just this page
    pub total_questions: usize,
    /// Category of every match, not just this page
    pub current_category: Vec<Option<String>>,
}

/// `GET /categories/{id}/questions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuestions {
    #[serde(rename = "Success")]
    pub success: bool,
    pub questions: Vec<Question>,
    /// Every question in the category, not just this page
    pub total_questions: usize,
    /// Display label of the requested category
    pub current_category: String,
}

/// Categories of `questions`, in order
pub fn categories_of(questions: &[Question]) -> Vec<Option<String>> {
    questions.iter().map(|q| q.category.clone()).collect()
}
