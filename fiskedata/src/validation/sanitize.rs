//! Depth-first string sanitization over arbitrary JSON

use serde_json::Value;

use super::text::validate_text;
use super::Violation;

/// Walk `data` and check every string leaf against the text whitelist.
///
/// Objects and arrays are descended into; numbers, booleans and null pass.
/// Object keys are not checked. Nesting deeper than `max_depth` fails.
pub fn check_strings(data: &Value, max_depth: usize) -> Result<(), Violation> {
    let mut stack: Vec<(&Value, usize)> = vec![(data, 0)];

    while let Some((node, depth)) = stack.pop() {
        match node {
            Value::String(s) => {
                if !validate_text(s) {
                    return Err(Violation::DisallowedText(s.clone()));
                }
            }
            Value::Array(items) => {
                if depth >= max_depth && !items.is_empty() {
                    return Err(Violation::DepthExceeded(max_depth));
                }
                // Reversed so elements are visited in document order
                stack.extend(items.iter().rev().map(|item| (item, depth + 1)));
            }
            Value::Object(map) => {
                if depth >= max_depth && !map.is_empty() {
                    return Err(Violation::DepthExceeded(max_depth));
                }
                let values: Vec<&Value> = map.values().collect();
                stack.extend(values.into_iter().rev().map(|value| (value, depth + 1)));
            }
            Value::Number(_) | Value::Bool(_) | Value::Null => {}
        }
    }

    Ok(())
}

/// Boolean form of [`check_strings`]
pub fn strings_are_clean(data: &Value, max_depth: usize) -> bool {
    check_strings(data, max_depth).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_nested_data() {
        let data = json!({
            "name": "Nidelva",
            "stations": [{"name": "St 1", "count": 3, "released": true, "comment": null}],
        });
        assert!(strings_are_clean(&data, 64));
    }

    #[test]
    fn test_dirty_leaf_anywhere() {
        let data = json!([["Art", "Antall"], ["laks", 2], [["deep", ["x;y"]]]]);
        assert_eq!(
            check_strings(&data, 64),
            Err(Violation::DisallowedText("x;y".into()))
        );
    }

    #[test]
    fn test_first_offender_in_document_order() {
        let data = json!(["a<b", "c>d"]);
        assert_eq!(
            check_strings(&data, 64),
            Err(Violation::DisallowedText("a<b".into()))
        );
    }

    #[test]
    fn test_keys_are_not_checked() {
        assert!(strings_are_clean(&json!({"Vær;": "fint"}), 64));
    }

    #[test]
    fn test_empty_string_is_rejected() {
        assert!(!strings_are_clean(&json!([""]), 64));
    }

    #[test]
    fn test_scalars_pass() {
        assert!(strings_are_clean(&json!(1.5), 0));
        assert!(strings_are_clean(&json!(null), 0));
        assert!(strings_are_clean(&json!(false), 0));
    }

    #[test]
    fn test_depth_guard() {
        let mut data = json!("leaf");
        for _ in 0..10 {
            data = json!([data]);
        }

        assert!(strings_are_clean(&data, 10));
        assert_eq!(check_strings(&data, 9), Err(Violation::DepthExceeded(9)));
    }

    #[test]
    fn test_very_deep_input_does_not_overflow() {
        let mut data = json!(1);
        for _ in 0..200 {
            data = Value::Array(vec![data]);
        }

        assert!(!strings_are_clean(&data, 64));
        assert!(strings_are_clean(&data, 201));
    }
}
