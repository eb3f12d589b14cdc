//! Wire types for the backend resources.
//!
//! Models are lenient on input: optional and server-computed fields default
//! when absent. Payload structs skip `None` fields so partial updates only send
//! what changed.

pub mod analytics;
pub mod appointment;
pub mod book;
pub mod chat;
pub mod exercise;
pub mod notification;
pub mod user;

use serde::{Deserialize, Serialize};

/// Primary key of a backend row.
pub type Id = u64;

/// Body of a list endpoint.
///
/// Endpoints behind DRF pagination return a page object; custom actions such
/// as `upcoming/` return a bare array. Both decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Plain(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListResponse::Paginated(page) => &page.results,
            ListResponse::Plain(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Plain(items) => items,
        }
    }

    /// Total row count; the item count for unpaginated lists.
    pub fn total(&self) -> u64 {
        match self {
            ListResponse::Paginated(page) => page.count.unwrap_or(page.results.len() as u64),
            ListResponse::Plain(items) => items.len() as u64,
        }
    }

    pub fn next_page(&self) -> Option<&str> {
        match self {
            ListResponse::Paginated(page) => page.next.as_deref(),
            ListResponse::Plain(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// `{"message": "..."}` acknowledgements returned by action endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: Id,
    }

    #[test]
    fn test_paginated_list() {
        let list: ListResponse<Row> = serde_json::from_value(json!({
            "count": 12,
            "next": "http://localhost:12000/api/books/?page=2",
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(list.total(), 12);
        assert_eq!(list.items().len(), 2);
        assert!(list.next_page().is_some());
    }

    #[test]
    fn test_plain_list() {
        let list: ListResponse<Row> = serde_json::from_value(json!([{"id": 7}])).unwrap();
        assert_eq!(list.total(), 1);
        assert_eq!(list.into_items(), vec![Row { id: 7 }]);
    }
}
