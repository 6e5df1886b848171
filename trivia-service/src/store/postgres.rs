//! PostgreSQL store backend

use async_trait::async_trait;
use sqlx::PgPool;

use super::{QuestionFilter, StoreError, StoreOperation, StoreResult, TriviaStore};
use crate::models::{Category, NewQuestion, Question};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `categories` and `questions` tables when missing
    ///
    /// Should be called once during startup.
    pub async fn initialize(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id SERIAL PRIMARY KEY,
                type TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Schema))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id SERIAL PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category TEXT,
                difficulty INTEGER CHECK (difficulty > 0)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Schema))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions (category)")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Schema))?;

        tracing::info!("Trivia schema ready");
        Ok(())
    }
}

/// Escape `LIKE` wildcards so `term` matches as a literal substring
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::ListCategories))
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions ORDER BY id",
            QUESTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from(e).with_operation(StoreOperation::ListQuestions))
    }

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE id = $1",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from(e).with_operation(StoreOperation::FindQuestion))
    }

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::FindCategory))
    }

    async fn find_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>> {
        let (sql, argument) = match filter {
            QuestionFilter::Category(id) => (
                format!(
                    "SELECT {} FROM questions WHERE category = $1 ORDER BY id",
                    QUESTION_COLUMNS
                ),
                id.clone(),
            ),
            QuestionFilter::QuestionContains(term) => (
                format!(
                    "SELECT {} FROM questions WHERE question ILIKE $1 ESCAPE '\\' ORDER BY id",
                    QUESTION_COLUMNS
                ),
                like_pattern(term),
            ),
        };

        sqlx::query_as::<_, Question>(&sql)
            .bind(argument)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::FindQuestions))
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        question.validate()?;

        sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        ))
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Insert))
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Delete))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_questions(&self) -> StoreResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Count))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Ping))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("title"), "%title%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
