//! Typed query parameters to URL pairs.

use crate::{Error, ErrorContext, Result};
use serde::Serialize;

/// Flatten a serializable parameter struct into query pairs.
///
/// - `None` fields are dropped
/// - sequences become a comma-separated value (`status=scheduled,confirmed`)
/// - booleans and numbers use their JSON spelling
pub fn to_query_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)?;
    let map = match value {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            return Err(Error::configuration_with_context(
                "Query parameters must serialize to an object",
                ErrorContext::new()
                    .with_details(other.to_string())
                    .with_source("query"),
            ))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        if let Some(v) = scalar(&value) {
            pairs.push((key, v));
        }
    }
    Ok(pairs)
}

fn scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Array(items) => {
            let joined: Vec<String> = items.iter().filter_map(scalar).collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join(","))
            }
        }
        serde_json::Value::Object(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    struct Filter {
        search: Option<String>,
        is_active: Option<bool>,
        category: Option<u64>,
        status: Vec<&'static str>,
    }

    #[test]
    fn test_drops_none_and_joins_lists() {
        let pairs = to_query_pairs(&Filter {
            search: Some("knee".into()),
            is_active: Some(false),
            category: None,
            status: vec!["scheduled", "confirmed"],
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("is_active".to_string(), "false".to_string()),
                ("search".to_string(), "knee".to_string()),
                ("status".to_string(), "scheduled,confirmed".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filter() {
        assert!(to_query_pairs(&Filter::default()).unwrap().is_empty());
        assert!(to_query_pairs(&()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(to_query_pairs(&vec![1, 2]).is_err());
    }
}
