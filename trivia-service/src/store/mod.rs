//! Question and category persistence
//!
//! Handlers talk to the store through [`TriviaStore`], held as a shared
//! `Arc<dyn TriviaStore>` created once at startup. Two backends exist:
//!
//! - [`MemoryStore`]: ordered in-process maps, optionally seeded (default backend)
//! - [`PgStore`]: PostgreSQL through an sqlx pool (`postgres` feature)
//!
//! Each method is a single independent call. A handler that deletes and then
//! re-reads makes two calls with no transaction between them.

use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

mod error;
mod memory;
pub mod seed;

#[cfg(feature = "postgres")]
mod postgres;

pub use error::{StoreError, StoreErrorKind, StoreOperation};
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
pub use postgres::PgStore;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Predicate for [`TriviaStore::find_questions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    /// Questions whose category equals this id, compared as strings
    Category(String),
    /// Questions whose text contains this term, ignoring case
    QuestionContains(String),
}

impl QuestionFilter {
    /// Evaluate the filter against an in-memory question
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::Category(id) => question.category.as_deref() == Some(id.as_str()),
            Self::QuestionContains(term) => question
                .question
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

/// Persistence operations the question service needs
///
/// Every list is returned ordered by id ascending.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// All questions
    async fn list_questions(&self) -> StoreResult<Vec<Question>>;

    /// One question, `None` when no row has this id
    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>>;

    /// One category, `None` when no row has this id
    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>>;

    /// Questions matching `filter`
    async fn find_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>>;

    /// Validate and persist a question, returning it with its new id
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question>;

    /// Delete a question; `false` when it was already gone
    async fn delete_question(&self, id: i32) -> StoreResult<bool>;

    /// Number of stored questions
    async fn count_questions(&self) -> StoreResult<u64>;

    /// Check the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs and readiness output
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, category: Option<&str>) -> Question {
        Question {
            id: 1,
            question: text.to_string(),
            answer: "answer".to_string(),
            category: category.map(str::to_string),
            difficulty: Some(1),
        }
    }

    #[test]
    fn test_category_filter_compares_strings() {
        let filter = QuestionFilter::Category("3".to_string());
        assert!(filter.matches(&question("q", Some("3"))));
        assert!(!filter.matches(&question("q", Some("33"))));
        assert!(!filter.matches(&question("q", None)));
    }

    #[test]
    fn test_contains_filter_ignores_case() {
        let filter = QuestionFilter::QuestionContains("TITLE".to_string());
        assert!(filter.matches(&question("What is the title of the film?", None)));
        assert!(filter.matches(&question("Titles matter", None)));
        assert!(!filter.matches(&question("Who wrote it?", None)));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let filter = QuestionFilter::QuestionContains(String::new());
        assert!(filter.matches(&question("anything", None)));
        assert!(filter.matches(&question("", None)));
    }
}
