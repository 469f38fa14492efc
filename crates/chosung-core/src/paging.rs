//! Cursor-based page request and page types.

use serde::{Deserialize, Serialize};

/// Request for one page of a listing.
///
/// `after` is the id of the last document of the previous page. Listings
/// only move forward; there is no jump-to-page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: usize,
    pub after: Option<String>,
}

impl PageRequest {
    /// First page with the given size.
    pub fn first(limit: usize) -> Self {
        Self { limit, after: None }
    }

    /// Page that continues after the document `cursor`.
    pub fn after(limit: usize, cursor: impl Into<String>) -> Self {
        Self {
            limit,
            after: Some(cursor.into()),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; `None` once a short page was returned.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Builds a page and derives the next cursor from the last item.
    ///
    /// A full page may be followed by more items, so it carries a cursor.
    /// A short page is the last one.
    pub fn from_items(items: Vec<T>, limit: usize, id_of: impl Fn(&T) -> &str) -> Self {
        let next_cursor = if limit > 0 && items.len() >= limit {
            items.last().map(|item| id_of(item).to_string())
        } else {
            None
        };
        Self { items, next_cursor }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}
