//! Page selection for question listings
//!
//! Pages are 1-indexed and hold [`QUESTIONS_PER_PAGE`] questions. A `page`
//! query parameter that is missing, non-numeric or below 1 selects the first
//! page; a page past the end of the list is simply empty.
//!
//! ```rust
//! use trivia_service::pagination::{paginate, Page};
//!
//! let items: Vec<u32> = (1..=25).collect();
//! assert_eq!(paginate(&items, Page::parse(Some("3"))), vec![21, 22, 23, 24, 25]);
//! assert!(paginate(&items, Page::parse(Some("4"))).is_empty());
//! assert_eq!(Page::parse(Some("abc")), Page::FIRST);
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;

use axum::{extract::FromRequestParts, extract::Query, http::request::Parts};

/// Number of questions on one page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-indexed page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(u64);

impl Page {
    /// The first page, used whenever no usable page is requested
    pub const FIRST: Page = Page(1);

    /// Create a page number, `None` for 0
    #[must_use]
    pub const fn new(number: u64) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Interpret a raw `page` parameter, falling back to [`Page::FIRST`]
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<u64>().ok())
            .and_then(Self::new)
            .unwrap_or(Self::FIRST)
    }

    #[must_use]
    pub const fn number(self) -> u64 {
        self.0
    }

    /// The part of `items` belonging to this page
    ///
    /// Pages beyond the end yield an empty slice, including pages whose
    /// offset does not fit in `usize`.
    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let start = (self.0 - 1)
            .checked_mul(QUESTIONS_PER_PAGE as u64)
            .and_then(|offset| usize::try_from(offset).ok());

        match start {
            Some(start) if start < items.len() => {
                let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
                &items[start..end]
            }
            _ => &[],
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Copy out the requested page of `items`
pub fn paginate<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    page.slice(items).to_vec()
}

/// Reads `?page=N` from the request URI and never rejects
impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<HashMap<String, String>>::try_from_uri(&parts.uri).ok();
        let raw = params
            .as_ref()
            .and_then(|Query(params)| params.get("page"))
            .map(String::as_str);

        Ok(Page::parse(raw))
    }
}
