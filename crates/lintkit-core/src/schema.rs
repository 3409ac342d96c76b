//! Options schema resolution.
//!
//! A rule's options are a JSON array. Rules describe it either slot by slot
//! ([`RuleSchema::Slots`]) or as one complete schema ([`RuleSchema::Full`]).
//! [`resolve_options_schema`] normalizes both into the single schema handed to
//! an external validator. Nothing here validates values.

use serde_json::{json, Value};

/// Options schema as declared by a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSchema {
    /// One schema per positional option slot. Empty means the rule takes no
    /// options.
    Slots(Vec<Value>),
    /// A complete schema for the options array, used as is.
    Full(Value),
}

impl Default for RuleSchema {
    fn default() -> Self {
        Self::Slots(Vec::new())
    }
}

impl RuleSchema {
    /// A schema accepting no options.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A schema with the given slot schemas.
    #[must_use]
    pub fn slots(slots: impl IntoIterator<Item = Value>) -> Self {
        Self::Slots(slots.into_iter().collect())
    }
}

/// Array schema produced from slot declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    /// Always 0: every slot is optional.
    pub min_items: usize,
    /// Number of declared slots.
    pub max_items: usize,
    /// Slot schemas in order; `None` when no slots are declared.
    pub items: Option<Vec<Value>>,
}

/// Normalized options schema.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsSchema {
    /// Positional array built from slot declarations.
    Array(ArraySchema),
    /// Full schema passed through from the rule.
    Custom(Value),
}

impl OptionsSchema {
    /// Returns the maximum number of option slots, if bounded.
    #[must_use]
    pub fn max_items(&self) -> Option<usize> {
        match self {
            Self::Array(array) => Some(array.max_items),
            Self::Custom(value) => value
                .get("maxItems")
                .and_then(Value::as_u64)
                .and_then(|n| usize::try_from(n).ok()),
        }
    }

    /// Returns the JSON-Schema document.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Array(array) => {
                let mut schema = json!({
                    "type": "array",
                    "minItems": array.min_items,
                    "maxItems": array.max_items,
                });
                if let (Some(items), Some(object)) = (&array.items, schema.as_object_mut()) {
                    object.insert("items".to_string(), Value::Array(items.clone()));
                }
                schema
            }
            Self::Custom(value) => value.clone(),
        }
    }
}

/// Normalizes a rule's declared schema.
///
/// - no slots: an array schema with `minItems = maxItems = 0` and no `items`
/// - `N` slots: `minItems = 0`, `maxItems = N`, `items` = the slots in order
/// - a full schema: returned unchanged
#[must_use]
pub fn resolve_options_schema(schema: &RuleSchema) -> OptionsSchema {
    match schema {
        RuleSchema::Slots(slots) if slots.is_empty() => OptionsSchema::Array(ArraySchema {
            min_items: 0,
            max_items: 0,
            items: None,
        }),
        RuleSchema::Slots(slots) => OptionsSchema::Array(ArraySchema {
            min_items: 0,
            max_items: slots.len(),
            items: Some(slots.clone()),
        }),
        RuleSchema::Full(value) => OptionsSchema::Custom(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_slots_resolve_to_empty_array() {
        let resolved = resolve_options_schema(&RuleSchema::none());
        let OptionsSchema::Array(array) = &resolved else {
            panic!("expected array schema");
        };
        assert_eq!(array.min_items, 0);
        assert_eq!(array.max_items, 0);
        assert!(array.items.is_none());
        insta::assert_snapshot!(resolved.to_json().to_string(), @r#"{"maxItems":0,"minItems":0,"type":"array"}"#);
    }

    #[test]
    fn slots_resolve_in_order() {
        let first = json!({"type": "integer"});
        let second = json!({"type": "object", "properties": {"allowTernary": {"type": "boolean"}}});
        let resolved = resolve_options_schema(&RuleSchema::slots([first.clone(), second.clone()]));
        assert_eq!(resolved.max_items(), Some(2));
        let OptionsSchema::Array(array) = resolved else {
            panic!("expected array schema");
        };
        assert_eq!(array.min_items, 0);
        assert_eq!(array.items, Some(vec![first, second]));
    }

    #[test]
    fn one_slot_json_shape() {
        let resolved = resolve_options_schema(&RuleSchema::slots([json!({"type": "boolean"})]));
        insta::assert_snapshot!(resolved.to_json().to_string(), @r#"{"items":[{"type":"boolean"}],"maxItems":1,"minItems":0,"type":"array"}"#);
    }

    #[test]
    fn full_schema_passes_through() {
        let full = json!({"type": "array", "items": [{"enum": ["always", "never"]}], "maxItems": 1});
        let resolved = resolve_options_schema(&RuleSchema::Full(full.clone()));
        assert_eq!(resolved, OptionsSchema::Custom(full.clone()));
        assert_eq!(resolved.to_json(), full);
        assert_eq!(resolved.max_items(), Some(1));
    }

    #[test]
    fn full_schema_without_bound_is_unbounded() {
        let resolved = resolve_options_schema(&RuleSchema::Full(json!({"type": "array"})));
        assert_eq!(resolved.max_items(), None);
    }
}
