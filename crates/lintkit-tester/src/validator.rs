//! JSON-Schema validation for rule options.
//!
//! Option schemas are written in draft 7, the dialect ESLint-style rule
//! schemas use: tuple `items` arrays, `additionalProperties`, `oneOf`.

use jsonschema::Draft;
use serde_json::Value;

/// Validates `instance` against `schema`, returning one `<path>: <message>`
/// entry per violation, where `<path>` is the JSON pointer of the offending
/// value (`/` for the root). An empty result means the instance is valid.
///
/// A schema that does not compile is reported as a single root entry.
#[must_use]
pub fn validate(schema: &Value, instance: &Value) -> Vec<String> {
    let validator = match jsonschema::options().with_draft(Draft::Draft7).build(schema) {
        Ok(validator) => validator,
        Err(err) => return vec![format!("/: invalid options schema: {err}")],
    };
    validator
        .iter_errors(instance)
        .map(|err| {
            let path = err.instance_path.to_string();
            let path = if path.is_empty() { "/" } else { path.as_str() };
            format!("{path}: {err}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options_schema() -> Value {
        json!({
            "type": "array",
            "minItems": 0,
            "maxItems": 1,
            "items": [{
                "type": "object",
                "properties": {
                    "max": {"type": "integer", "minimum": 0},
                    "countVoidThis": {"type": "boolean"}
                },
                "additionalProperties": false
            }]
        })
    }

    fn paths(errors: &[String]) -> Vec<&str> {
        let mut paths: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.split_once(": ").map(|(path, _)| path))
            .collect();
        paths.sort_unstable();
        paths
    }

    #[test]
    fn accepts_matching_options() {
        assert!(validate(&options_schema(), &json!([])).is_empty());
        let options = json!([{"max": 2, "countVoidThis": true}]);
        assert!(validate(&options_schema(), &options).is_empty());
    }

    #[test]
    fn reports_each_violation_with_its_path() {
        let errors = validate(
            &options_schema(),
            &json!([{"max": -1, "countVoidThis": "yes", "extra": 1}]),
        );
        assert_eq!(paths(&errors), ["/0", "/0/countVoidThis", "/0/max"]);
        assert!(errors.iter().any(|e| e.contains("extra")));
    }

    #[test]
    fn enforces_item_bounds() {
        assert_eq!(paths(&validate(&options_schema(), &json!([{}, {}]))), ["/"]);
        let errors = validate(&json!({"type": "array", "maxItems": 0}), &json!([true]));
        assert_eq!(paths(&errors), ["/"]);
    }

    #[test]
    fn one_of_requires_exactly_one_match() {
        let schema = json!({
            "oneOf": [
                {"type": "integer", "minimum": 0},
                {"type": "object", "properties": {"max": {"type": "integer"}}}
            ]
        });
        assert!(validate(&schema, &json!(3)).is_empty());
        assert!(validate(&schema, &json!({"max": 3})).is_empty());
        assert_eq!(validate(&schema, &json!("three")).len(), 1);
    }

    #[test]
    fn any_of_and_enum() {
        let schema = json!({"anyOf": [{"enum": ["always", "never"]}, {"type": "boolean"}]});
        assert!(validate(&schema, &json!("never")).is_empty());
        assert!(validate(&schema, &json!(false)).is_empty());
        assert_eq!(validate(&schema, &json!("sometimes")).len(), 1);
    }

    #[test]
    fn integers_include_whole_floats() {
        let schema = json!({"type": "integer"});
        assert!(validate(&schema, &json!(2)).is_empty());
        assert!(validate(&schema, &json!(3.0)).is_empty());
        assert_eq!(validate(&schema, &json!(2.5)).len(), 1);
    }

    #[test]
    fn every_keyword_is_enforced() {
        let cases = [
            (json!({"type": "string", "maxLength": 2}), json!("abcdef")),
            (json!({"type": "string", "pattern": "^a$"}), json!("zzz")),
            (json!({"not": {"type": "string"}}), json!("s")),
            (json!({"exclusiveMinimum": 0}), json!(0)),
            (json!({"type": "array", "uniqueItems": true}), json!([1, 1])),
        ];
        for (schema, instance) in cases {
            assert_eq!(
                paths(&validate(&schema, &instance)),
                ["/"],
                "{schema} should reject {instance}"
            );
        }
    }

    #[test]
    fn broken_schema_is_reported() {
        let errors = validate(&json!({"type": "no-such-type"}), &json!(1));
        assert_eq!(paths(&errors), ["/"]);
        assert!(errors[0].contains("invalid options schema"));
    }
}
