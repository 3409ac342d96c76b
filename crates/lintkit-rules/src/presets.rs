//! Rule presets for common configurations.

use crate::{MaxParams, NoUnusedExpressions};
use lintkit_core::RuleBox;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Preset configurations for lintkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Rules marked as recommended.
    Recommended,
    /// Every rule that is not deprecated.
    Strict,
    /// Every rule.
    All,
}

impl Preset {
    /// Returns the preset's name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::All => "all",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        all_rules()
            .into_iter()
            .filter(|rule| {
                let meta = rule.meta();
                match self {
                    Self::Recommended => meta.recommended,
                    Self::Strict => !meta.deprecated,
                    Self::All => true,
                }
            })
            .collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset `{0}` (expected recommended, strict or all)")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "all" => Ok(Self::All),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

/// Returns the recommended set of rules.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the strict set of rules.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    Preset::Strict.rules()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MaxParams::new()),
        Box::new(NoUnusedExpressions::new()),
    ]
}

/// Looks up a rule by name.
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    let rule = all_rules().into_iter().find(|rule| rule.name() == name);
    if rule.is_none() {
        debug!("No built-in rule named {}", name);
    }
    rule
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(names(&Preset::Recommended.rules()), ["no-unused-expressions"]);
        assert_eq!(
            names(&Preset::Strict.rules()),
            ["max-params", "no-unused-expressions"]
        );
        assert_eq!(names(&Preset::All.rules()).len(), 2);
    }

    #[test]
    fn test_preset_names() {
        for preset in [Preset::Recommended, Preset::Strict, Preset::All] {
            assert_eq!(preset.as_str().parse::<Preset>(), Ok(preset));
        }
        assert_eq!(
            "minimal".parse::<Preset>(),
            Err(UnknownPreset("minimal".into()))
        );
    }

    #[test]
    fn test_rule_by_name() {
        let rule = rule_by_name("max-params").expect("rule");
        assert!(rule.meta().extends_base_rule);
        assert!(rule_by_name("no-debugger").is_none());
    }
}
