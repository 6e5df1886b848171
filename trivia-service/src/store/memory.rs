//! In-process store backend
//!
//! Rows live in ordered maps behind a `tokio::sync::RwLock`, so every list
//! comes back in id order without sorting. Question ids increase
//! monotonically and are never handed out twice, even after deletes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    seed, QuestionFilter, StoreError, StoreErrorKind, StoreOperation, StoreResult, TriviaStore,
};
use crate::models::{Category, NewQuestion, Question};

#[derive(Debug)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    questions: BTreeMap<i32, Question>,
    next_question_id: i32,
}

impl Tables {
    fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: BTreeMap::new(),
            next_question_id: 1,
        }
    }

    fn insert(&mut self, new: NewQuestion) -> StoreResult<Question> {
        new.validate()?;

        let id = self.next_question_id;
        self.next_question_id = id.checked_add(1).ok_or_else(|| {
            StoreError::new(
                StoreOperation::Insert,
                StoreErrorKind::Other,
                "question id sequence exhausted",
            )
        })?;

        let question = Question {
            id,
            question: new.question.unwrap_or_default(),
            answer: new.answer.unwrap_or_default(),
            category: new.category,
            difficulty: new.difficulty,
        };
        self.questions.insert(id, question.clone());
        Ok(question)
    }
}

/// Store backed by process memory
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// An empty store with no categories and no questions
    pub fn new() -> Self {
        Self::with_categories(Vec::new())
    }

    /// A store holding the given categories and no questions
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            tables: RwLock::new(Tables::new(categories)),
        }
    }

    /// A store holding the standard categories and the sample questions
    pub fn seeded() -> StoreResult<Self> {
        let mut tables = Tables::new(seed::categories());
        for question in seed::questions() {
            tables.insert(question)?;
        }
        tracing::debug!(
            categories = tables.categories.len(),
            questions = tables.questions.len(),
            "Seeded in-memory store"
        );
        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        self.tables.write().await.insert(question)
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables.write().await.questions.remove(&id).is_some())
    }

    async fn count_questions(&self) -> StoreResult<u64> {
        Ok(self.tables.read().await.questions.len() as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store
            .insert_question(NewQuestion::new("q1", "a1", "1", 1))
            .await
            .unwrap();
        let second = store
            .insert_question(NewQuestion::new("q2", "a2", "1", 1))
            .await
            .unwrap();
        assert!(store.delete_question(second.id).await.unwrap());

        let third = store
            .insert_question(NewQuestion::new("q3", "a3", "1", 1))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(third.id, 3);
        assert_eq!(store.count_questions().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_question(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_question() {
        let store = MemoryStore::new();
        let err = store
            .insert_question(NewQuestion::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::ValidationFailed);
        assert_eq!(store.count_questions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lists_are_ordered_by_id() {
        let store = MemoryStore::with_categories(vec![
            Category::new(3, "Geography"),
            Category::new(1, "Science"),
        ]);
        let ids: Vec<i32> = store
            .list_categories()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_find_questions_by_category() {
        let store = MemoryStore::seeded().unwrap();
        let science = store
            .find_questions(&QuestionFilter::Category("1".to_string()))
            .await
            .unwrap();
        assert!(!science.is_empty());
        assert!(science.iter().all(|q| q.category.as_deref() == Some("1")));
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = MemoryStore::seeded().unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 6);
        assert_eq!(
            store.count_questions().await.unwrap(),
            seed::questions().len() as u64
        );
        assert_eq!(
            store.find_category(1).await.unwrap().map(|c| c.kind),
            Some("Science".to_string())
        );
        assert!(store.find_category(99).await.unwrap().is_none());
    }
}
