//! Normalisation of list response bodies.
//!
//! Each backend resource nests its rows differently (`data`, `data.data`,
//! `data.category`, ...). The path to the rows and to the total count is
//! declared per resource as JSON pointers and resolved here, so screens only
//! ever see a [`ListPage`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Where a resource keeps its rows and its total inside a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPath {
    /// JSON pointer to the array of rows, e.g. `"/data/data"`.
    pub items: &'static str,
    /// JSON pointer to the total row count, if the endpoint reports one.
    pub total: Option<&'static str>,
}

impl ListPath {
    pub const fn new(items: &'static str, total: Option<&'static str>) -> Self {
        Self { items, total }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnwrapError {
    #[error("response body has no list at `{0}`")]
    MissingItems(&'static str),
    #[error("value at `{0}` is not an array")]
    NotAnArray(&'static str),
}

/// One page of rows as handed to the data grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl ListPage<Value> {
    /// Extracts rows and total from a raw body using the resource's path.
    ///
    /// A missing or non-numeric total falls back to the number of rows on
    /// the page (endpoints without server pagination).
    pub fn from_body(body: &Value, path: &ListPath) -> Result<Self, UnwrapError> {
        let items = match body.pointer(path.items) {
            Some(Value::Array(rows)) => rows.clone(),
            Some(Value::Null) | None => return Err(UnwrapError::MissingItems(path.items)),
            Some(_) => return Err(UnwrapError::NotAnArray(path.items)),
        };

        let total = path
            .total
            .and_then(|pointer| body.pointer(pointer))
            .and_then(total_from_value)
            .unwrap_or(items.len());

        Ok(Self { items, total })
    }
}

fn total_from_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().map(|v| v as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extracts a single document from a body, e.g. `/data` for `GET api/brand/:id`.
pub fn unwrap_document(body: &Value, pointer: &str) -> Option<Value> {
    if pointer.is_empty() {
        return Some(body.clone());
    }
    body.pointer(pointer).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_data_with_total() {
        let body = json!({ "data": [{ "_id": "a" }, { "_id": "b" }], "total": 40 });
        let page = ListPage::from_body(&body, &ListPath::new("/data", Some("/total"))).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 40);
    }

    #[test]
    fn test_nested_data_and_string_total() {
        let body = json!({ "data": { "data": [{ "id": 1 }], "total": "7" } });
        let page =
            ListPage::from_body(&body, &ListPath::new("/data/data", Some("/data/total"))).unwrap();
        assert_eq!(page.items, vec![json!({ "id": 1 })]);
        assert_eq!(page.total, 7);
    }

    #[test]
    fn test_total_falls_back_to_row_count() {
        let body = json!({ "data": { "category": [{}, {}, {}] } });
        let page =
            ListPage::from_body(&body, &ListPath::new("/data/category", Some("/data/total")))
                .unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_missing_and_wrong_shape() {
        let path = ListPath::new("/data", None);
        assert_eq!(
            ListPage::from_body(&json!({ "message": "ok" }), &path),
            Err(UnwrapError::MissingItems("/data"))
        );
        assert_eq!(
            ListPage::from_body(&json!({ "data": { "x": 1 } }), &path),
            Err(UnwrapError::NotAnArray("/data"))
        );
    }

    #[test]
    fn test_unwrap_document() {
        let body = json!({ "data": { "name": "Whiskas" } });
        assert_eq!(unwrap_document(&body, "/data"), Some(json!({ "name": "Whiskas" })));
        assert_eq!(unwrap_document(&body, ""), Some(body.clone()));
        assert_eq!(unwrap_document(&body, "/nope"), None);
    }
}
