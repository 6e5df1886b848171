//! Question and category records
//!
//! [`Question`] doubles as the "formatted question" returned to clients:
//! `{ id, question, answer, category, difficulty }`.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::store::{StoreError, StoreResult};

/// A stored trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Question {
    /// Store-assigned identifier, never reused
    pub id: i32,
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Category id in string form; not checked against the categories table
    pub category: Option<String>,
    /// Difficulty score, 1 being the easiest
    pub difficulty: Option<i32>,
}

/// A question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    /// Category identifier
    pub id: i32,
    /// Display label, e.g. "Science"
    #[serde(rename = "type")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "type"))]
    pub kind: String,
}

impl Category {
    pub fn new(id: i32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Body of `POST /questions`
///
/// Every field is optional at the wire level. Missing values are only
/// rejected when the store validates the insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: Option<String>,

    #[serde(default)]
    pub answer: Option<String>,

    /// Accepts `3` or `"3"`
    #[serde(default, deserialize_with = "difficulty")]
    pub difficulty: Option<i32>,

    /// Accepts `2` or `"2"`; kept as a string either way
    #[serde(default, deserialize_with = "category_id")]
    pub category: Option<String>,
}

impl NewQuestion {
    /// Shorthand used by seed data and tests
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
        difficulty: i32,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            difficulty: Some(difficulty),
            category: Some(category.into()),
        }
    }

    /// Check the constraints every store enforces before inserting
    pub fn validate(&self) -> StoreResult<()> {
        if is_blank(self.question.as_deref()) {
            return Err(StoreError::validation_failed("question text is required"));
        }
        if is_blank(self.answer.as_deref()) {
            return Err(StoreError::validation_failed("answer text is required"));
        }
        if let Some(difficulty) = self.difficulty {
            if difficulty < 1 {
                return Err(StoreError::validation_failed(format!(
                    "difficulty must be a positive integer, got {}",
                    difficulty
                )));
            }
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(i64),
}

fn category_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

fn difficulty<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TextOrNumber::Number(number)) => i32::try_from(number)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("difficulty {} is out of range", number))),
        Some(TextOrNumber::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(TextOrNumber::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid difficulty `{}`", text))),
    }
}
