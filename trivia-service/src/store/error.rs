//! Store error types
//!
//! Every backend reports failures as a [`StoreError`] carrying the operation
//! that failed and a coarse classification. Handlers decide how a given
//! failure reaches the client; the store never chooses HTTP statuses.
//!
//! ```rust
//! use trivia_service::store::{StoreError, StoreErrorKind, StoreOperation};
//!
//! let error = StoreError::validation_failed("question text is required");
//! assert_eq!(error.kind, StoreErrorKind::ValidationFailed);
//! assert_eq!(error.operation, StoreOperation::Insert);
//! ```

use std::fmt;

/// Operation being performed when the store error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Listing every category
    ListCategories,
    /// Listing every question
    ListQuestions,
    /// Looking up one question by id
    FindQuestion,
    /// Looking up one category by id
    FindCategory,
    /// Filtering questions by category or text
    FindQuestions,
    /// Inserting a question
    Insert,
    /// Deleting a question
    Delete,
    /// Counting questions
    Count,
    /// Connectivity check
    Ping,
    /// Creating tables
    Schema,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListCategories => write!(f, "list_categories"),
            Self::ListQuestions => write!(f, "list_questions"),
            Self::FindQuestion => write!(f, "find_question"),
            Self::FindCategory => write!(f, "find_category"),
            Self::FindQuestions => write!(f, "find_questions"),
            Self::Insert => write!(f, "insert"),
            Self::Delete => write!(f, "delete"),
            Self::Count => write!(f, "count"),
            Self::Ping => write!(f, "ping"),
            Self::Schema => write!(f, "schema"),
        }
    }
}

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// Row was expected but missing
    NotFound,
    /// Database constraint violation (not null, check, unique)
    ConstraintViolation,
    /// Rejected before reaching the database
    ValidationFailed,
    /// Could not reach the database
    ConnectionFailed,
    /// Operation or pool acquisition timed out
    Timeout,
    /// Query failed inside the database
    Database,
    /// Anything else
    Other,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::Database => write!(f, "database"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured store error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// The operation being performed when the error occurred
    pub operation: StoreOperation,
    /// The category of error
    pub kind: StoreErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl StoreError {
    pub fn new(
        operation: StoreOperation,
        kind: StoreErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }

    /// An insert rejected by validation
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(
            StoreOperation::Insert,
            StoreErrorKind::ValidationFailed,
            message,
        )
    }

    pub fn connection_failed(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::ConnectionFailed, message)
    }

    /// Replace the operation, used when a driver error is converted without context
    #[must_use]
    pub fn with_operation(mut self, operation: StoreOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Transient errors that may succeed on retry
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::ConnectionFailed | StoreErrorKind::Timeout
        )
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Store {} error during {}: {}",
            self.kind, self.operation, self.message
        )
    }
}

impl std::error::Error for StoreError {}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;

        // Operation is filled in by the caller via `with_operation`
        let operation = StoreOperation::ListQuestions;
        match err {
            E::RowNotFound => Self::new(operation, StoreErrorKind::NotFound, "row not found"),
            E::PoolTimedOut => Self::new(
                operation,
                StoreErrorKind::Timeout,
                "connection pool timed out",
            ),
            E::PoolClosed => Self::connection_failed(operation, "connection pool is closed"),
            E::Io(e) => Self::connection_failed(operation, e.to_string()),
            E::Tls(e) => Self::connection_failed(operation, format!("TLS error: {}", e)),
            E::Database(db) => {
                let kind = if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation()
                    // not_null_violation
                    || db.code().as_deref() == Some("23502")
                {
                    StoreErrorKind::ConstraintViolation
                } else {
                    StoreErrorKind::Database
                };
                Self::new(operation, kind, db.message().to_string())
            }
            other => Self::new(operation, StoreErrorKind::Other, other.to_string()),
        }
    }
}
