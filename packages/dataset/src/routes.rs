//! Route identifier extraction from feature properties.
//!
//! Identifiers arrive either as a single integer field or as a delimited
//! list (`"3,4,5"`). Integers, numeric strings, and JSON arrays of either
//! are all accepted. Anything that does not parse as a non-negative
//! integer is skipped, so a feature with a missing or garbled field simply
//! carries no identifiers.

use geojson::Feature;
use route_map_route_models::{RouteId, RouteIdExtractor};
use serde_json::Value;

/// Returns the route identifiers carried by `feature`.
///
/// Duplicates are dropped, keeping first-seen order.
#[must_use]
pub fn route_ids(feature: &Feature, extractor: &RouteIdExtractor) -> Vec<RouteId> {
    let Some(value) = feature.property(extractor.field()) else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    match extractor {
        RouteIdExtractor::Single { .. } => ids.extend(scalar_id(value)),
        RouteIdExtractor::List { delimiter, .. } => collect_list(value, delimiter, &mut ids),
    }
    ids
}

fn collect_list(value: &Value, delimiter: &str, ids: &mut Vec<RouteId>) {
    match value {
        Value::String(s) => {
            for token in s.split(delimiter) {
                if let Ok(id) = token.parse::<RouteId>() {
                    push_unique(ids, id);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_list(item, delimiter, ids);
            }
        }
        other => {
            if let Some(id) = scalar_id(other) {
                push_unique(ids, id);
            }
        }
    }
}

fn push_unique(ids: &mut Vec<RouteId>, id: RouteId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Parses a single identifier from a number or numeric string.
fn scalar_id(value: &Value) -> Option<RouteId> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).ok().map(RouteId);
            }
            // Some exports write integral ids as floats (`3.0`).
            let f = n.as_f64()?;
            if f.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&f) {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let id = f as u32;
            Some(RouteId(id))
        }
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(props: &Value) -> Feature {
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: props.as_object().cloned(),
            foreign_members: None,
        }
    }

    fn single() -> RouteIdExtractor {
        RouteIdExtractor::Single {
            field: "ID".to_string(),
        }
    }

    fn list() -> RouteIdExtractor {
        RouteIdExtractor::List {
            field: "IDs".to_string(),
            delimiter: ",".to_string(),
        }
    }

    #[test]
    fn reads_integer_field() {
        let f = feature(&json!({"ID": 7}));
        assert_eq!(route_ids(&f, &single()), vec![RouteId(7)]);
    }

    #[test]
    fn reads_numeric_string_and_integral_float() {
        assert_eq!(
            route_ids(&feature(&json!({"ID": " 12"})), &single()),
            vec![RouteId(12)]
        );
        assert_eq!(
            route_ids(&feature(&json!({"ID": 5.0})), &single()),
            vec![RouteId(5)]
        );
    }

    #[test]
    fn missing_or_malformed_field_yields_nothing() {
        assert!(route_ids(&feature(&json!({"other": 1})), &single()).is_empty());
        assert!(route_ids(&feature(&json!({"ID": null})), &single()).is_empty());
        assert!(route_ids(&feature(&json!({"ID": "abc"})), &single()).is_empty());
        assert!(route_ids(&feature(&json!({"ID": 2.5})), &single()).is_empty());
        assert!(route_ids(&feature(&json!({"ID": -1})), &single()).is_empty());
    }

    #[test]
    fn splits_delimited_list() {
        let f = feature(&json!({"IDs": "3, 4,5"}));
        assert_eq!(
            route_ids(&f, &list()),
            vec![RouteId(3), RouteId(4), RouteId(5)]
        );
    }

    #[test]
    fn list_skips_empty_bad_and_duplicate_tokens() {
        let f = feature(&json!({"IDs": "3,,x,4,3,"}));
        assert_eq!(route_ids(&f, &list()), vec![RouteId(3), RouteId(4)]);
    }

    #[test]
    fn list_accepts_bare_number_and_array() {
        assert_eq!(
            route_ids(&feature(&json!({"IDs": 8})), &list()),
            vec![RouteId(8)]
        );
        assert_eq!(
            route_ids(&feature(&json!({"IDs": [1, "2", "2,6"]})), &list()),
            vec![RouteId(1), RouteId(2), RouteId(6)]
        );
    }

    #[test]
    fn honors_custom_delimiter() {
        let extractor = RouteIdExtractor::List {
            field: "IDs".to_string(),
            delimiter: ";".to_string(),
        };
        let f = feature(&json!({"IDs": "10;11"}));
        assert_eq!(route_ids(&f, &extractor), vec![RouteId(10), RouteId(11)]);
    }
}
