//! Flattening of typed inputs into URL query parameters.
//!
//! Inputs are serialized through `serde_json` so the same `#[serde]` attributes that name JSON
//! fields also name query parameters. `null` fields are dropped and arrays become repeated
//! parameters under the same name.

use serde::Serialize;
use serde_json::Value;

use crate::errors::{GrafanaError, Result};

pub(crate) type QueryPairs = Vec<(String, String)>;

pub(crate) fn to_query_pairs<T: Serialize + ?Sized>(input: &T) -> Result<QueryPairs> {
    let value = serde_json::to_value(input).map_err(GrafanaError::Serialize)?;

    let fields = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(GrafanaError::UnsupportedQuery(format!(
                "expected a struct, got {}",
                kind(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(item) = scalar(&name, item)? {
                        pairs.push((name.clone(), item));
                    }
                }
            }
            value => {
                if let Some(value) = scalar(&name, value)? {
                    pairs.push((name, value));
                }
            }
        }
    }

    Ok(pairs)
}

fn scalar(name: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(GrafanaError::UnsupportedQuery(format!(
            "field `{name}` is {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        dashboard_id: Option<i64>,
        tags: Vec<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
        matches_any: Option<bool>,
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let pairs = to_query_pairs(&Filter::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_fields_use_external_names_in_declared_order() {
        let filter = Filter {
            dashboard_id: Some(7),
            kind: Some("alert".into()),
            matches_any: Some(true),
            ..Default::default()
        };
        let pairs = to_query_pairs(&filter).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("dashboardId".to_string(), "7".to_string()),
                ("type".to_string(), "alert".to_string()),
                ("matchesAny".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_sequences_repeat_the_parameter() {
        let filter = Filter {
            tags: vec!["deploy".into(), "prod".into()],
            ..Default::default()
        };
        let pairs = to_query_pairs(&filter).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("tags".to_string(), "deploy".to_string()),
                ("tags".to_string(), "prod".to_string()),
            ]
        );
    }

    #[test]
    fn test_unit_input_has_no_parameters() {
        assert!(to_query_pairs(&()).unwrap().is_empty());
    }

    #[test]
    fn test_nested_objects_are_rejected() {
        #[derive(Serialize)]
        struct Nested {
            settings: HashMap<String, String>,
        }

        let input = Nested {
            settings: HashMap::from([("url".to_string(), "http://x".to_string())]),
        };
        let err = to_query_pairs(&input).unwrap_err();
        assert!(matches!(err, GrafanaError::UnsupportedQuery(_)));
    }

    #[test]
    fn test_non_struct_input_is_rejected() {
        let err = to_query_pairs(&42).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported query input: expected a struct, got a number"
        );
    }
}
