#![deny(missing_docs)]

//! # Pagination
//!
//! Page request parsing and the take/skip arithmetic shared by list endpoints.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Largest page number a client may request.
pub const MAX_CURRENT_PAGE: i64 = 100;
/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 50;

const DEFAULT_CURRENT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 20;

/// A page request, optionally filtered by a search word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginatorReq {
    /// 1-based page number.
    #[serde(default = "default_current_page")]
    pub current_page: i64,
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Optional substring filter on the record name.
    #[serde(default)]
    pub search_word: Option<String>,
}

fn default_current_page() -> i64 {
    DEFAULT_CURRENT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginatorReq {
    fn default() -> Self {
        Self {
            current_page: DEFAULT_CURRENT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            search_word: None,
        }
    }
}

impl PaginatorReq {
    /// Checks page bounds.
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_CURRENT_PAGE).contains(&self.current_page) {
            return Err(AppError::bad_request(format!(
                "currentPage should be an integer between 1 and {MAX_CURRENT_PAGE}"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(AppError::bad_request(format!(
                "pageSize should be an integer between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }

    /// The search word, treating an empty string as absent.
    pub fn search_word(&self) -> Option<&str> {
        self.search_word.as_deref().filter(|w| !w.is_empty())
    }
}

/// Row window derived from a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeSkip {
    /// Rows to return.
    pub take: i64,
    /// Rows to skip before the first returned one.
    pub skip: i64,
}

/// Converts a page request into a row window.
pub fn calculate_take_skip(req: &PaginatorReq) -> TakeSkip {
    TakeSkip {
        take: req.page_size,
        skip: (req.current_page - 1) * req.page_size,
    }
}

/// Page metadata returned next to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginator {
    /// Echo of the requested page.
    pub current_page: i64,
    /// Echo of the requested size.
    pub page_size: i64,
    /// Number of pages needed for `total_record` rows.
    pub total_page: i64,
    /// Total matching rows.
    pub total_record: i64,
}

impl Paginator {
    /// Builds page metadata for `total` matching rows.
    pub fn new(req: &PaginatorReq, total: i64) -> Self {
        let page_size = req.page_size.max(1);
        Self {
            current_page: req.current_page,
            page_size: req.page_size,
            total_page: (total + page_size - 1) / page_size,
            total_record: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn req(current_page: i64, page_size: i64) -> PaginatorReq {
        PaginatorReq {
            current_page,
            page_size,
            search_word: None,
        }
    }

    #[test]
    fn test_take_skip() {
        assert_eq!(calculate_take_skip(&req(1, 10)), TakeSkip { take: 10, skip: 0 });
        assert_eq!(calculate_take_skip(&req(3, 20)), TakeSkip { take: 20, skip: 40 });
    }

    #[test]
    fn test_total_page_rounds_up() {
        let r = req(1, 20);
        assert_eq!(Paginator::new(&r, 0).total_page, 0);
        assert_eq!(Paginator::new(&r, 20).total_page, 1);
        assert_eq!(Paginator::new(&r, 58).total_page, 3);
    }

    #[test]
    fn test_defaults_from_empty_query() {
        let parsed: PaginatorReq = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PaginatorReq::default());
    }

    #[test]
    fn test_bounds() {
        assert!(req(1, 50).validate().is_ok());
        assert!(req(0, 20).validate().is_err());
        assert!(req(101, 20).validate().is_err());
        assert!(req(1, 51).validate().is_err());
    }

    #[test]
    fn test_empty_search_word_is_ignored() {
        let mut r = req(1, 20);
        r.search_word = Some(String::new());
        assert_eq!(r.search_word(), None);
        r.search_word = Some("dict".into());
        assert_eq!(r.search_word(), Some("dict"));
    }
}
