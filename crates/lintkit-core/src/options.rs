//! Option defaulting and typed access to option slots.

use crate::rule::Rule;
use crate::schema::{resolve_options_schema, RuleSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while resolving or reading options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// More option slots were supplied than the schema allows.
    #[error("rule `{rule}` accepts at most {max} option(s), got {supplied}")]
    TooManySlots {
        /// Rule name.
        rule: String,
        /// Number of supplied slots.
        supplied: usize,
        /// Maximum allowed by the resolved schema.
        max: usize,
    },

    /// A slot does not have the shape the rule expects.
    #[error("option slot {index} is invalid: {source}")]
    InvalidSlot {
        /// Slot index.
        index: usize,
        /// Deserialization error.
        source: serde_json::Error,
    },
}

/// The effective option values of one rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    values: Vec<Value>,
}

impl ResolvedOptions {
    /// Wraps already resolved values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns all slot values.
    #[must_use]
    pub fn raw(&self) -> &[Value] {
        &self.values
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw value of slot `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Deserializes slot `index`. A missing slot yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidSlot`] if the value does not fit `T`.
    pub fn slot<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, OptionsError> {
        self.values
            .get(index)
            .map(|value| {
                T::deserialize(value).map_err(|source| OptionsError::InvalidSlot { index, source })
            })
            .transpose()
    }

    /// Deserializes slot `index`, falling back to `T::default()` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidSlot`] if the value does not fit `T`.
    pub fn slot_or_default<T: DeserializeOwned + Default>(
        &self,
        index: usize,
    ) -> Result<T, OptionsError> {
        Ok(self.slot(index)?.unwrap_or_default())
    }
}

/// Resolves the options a rule will see.
///
/// The result is `supplied ++ defaults[supplied.len()..]`: supplied slots win
/// whole, missing trailing slots come from the rule's defaults.
///
/// # Errors
///
/// Returns [`OptionsError::TooManySlots`] when more slots are supplied than
/// the resolved schema's `maxItems`.
pub fn resolve_options(
    rule: &dyn Rule,
    supplied: Vec<Value>,
) -> Result<ResolvedOptions, OptionsError> {
    apply_defaults(
        rule.name(),
        &rule.schema(),
        &rule.default_options(),
        supplied,
    )
}

/// [`resolve_options`] on explicit parts.
///
/// # Errors
///
/// Returns [`OptionsError::TooManySlots`] when more slots are supplied than
/// the resolved schema's `maxItems`.
pub fn apply_defaults(
    rule: &str,
    schema: &RuleSchema,
    defaults: &[Value],
    mut supplied: Vec<Value>,
) -> Result<ResolvedOptions, OptionsError> {
    if let Some(max) = resolve_options_schema(schema).max_items() {
        if supplied.len() > max {
            return Err(OptionsError::TooManySlots {
                rule: rule.to_string(),
                supplied: supplied.len(),
                max,
            });
        }
    }
    if let Some(rest) = defaults.get(supplied.len()..) {
        supplied.extend_from_slice(rest);
    }
    Ok(ResolvedOptions::new(supplied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn two_slots() -> RuleSchema {
        RuleSchema::slots([json!({"type": "string"}), json!({"type": "object"})])
    }

    #[test]
    fn missing_slots_take_defaults() {
        let defaults = [json!("always"), json!({"ignore": true})];
        let resolved =
            apply_defaults("r", &two_slots(), &defaults, vec![json!("never")]).expect("resolve");
        assert_eq!(resolved.raw(), &[json!("never"), json!({"ignore": true})]);
    }

    #[test]
    fn supplied_slots_win_whole() {
        let defaults = [json!({"max": 3, "countVoidThis": false})];
        let schema = RuleSchema::slots([json!({"type": "object"})]);
        let resolved =
            apply_defaults("r", &schema, &defaults, vec![json!({"max": 1})]).expect("resolve");
        assert_eq!(resolved.raw(), &[json!({"max": 1})]);
    }

    #[test]
    fn no_supplied_slots_use_all_defaults() {
        let defaults = [json!(1), json!(2)];
        let resolved = apply_defaults("r", &two_slots(), &defaults, vec![]).expect("resolve");
        assert_eq!(resolved.raw(), &defaults);
    }

    #[test]
    fn too_many_slots_is_fatal() {
        let err = apply_defaults("no-args", &RuleSchema::none(), &[], vec![json!(1)])
            .expect_err("must fail");
        assert_eq!(err.to_string(), "rule `no-args` accepts at most 0 option(s), got 1");
    }

    #[test]
    fn unbounded_full_schema_accepts_any_count() {
        let schema = RuleSchema::Full(json!({"type": "array"}));
        let resolved =
            apply_defaults("r", &schema, &[], vec![json!(1), json!(2), json!(3)]).expect("resolve");
        assert_eq!(resolved.len(), 3);
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Flags {
        #[serde(default)]
        allow_ternary: bool,
    }

    #[test]
    fn typed_slot_access() {
        let options = ResolvedOptions::new(vec![json!({"allowTernary": true})]);
        let flags: Flags = options.slot_or_default(0).expect("slot");
        assert!(flags.allow_ternary);
        let missing: Option<Flags> = options.slot(1).expect("slot");
        assert!(missing.is_none());

        let bad = ResolvedOptions::new(vec![json!("nope")]);
        let err = bad.slot::<Flags>(0).expect_err("must fail");
        assert!(matches!(err, OptionsError::InvalidSlot { index: 0, .. }));
    }
}
