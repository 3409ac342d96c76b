//! Diagnostics and lint results.

use lintkit_ast::{SourceLocation, Span};
use miette::{Diagnostic as MietteDiagnostic, SourceSpan};
use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A textual replacement described by a suggestion. Never applied by lintkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// Byte range to replace.
    pub span: Span,
    /// Replacement text.
    pub text: String,
}

impl TextEdit {
    /// Replaces `span` with `text`.
    #[must_use]
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Inserts `text` at `offset`.
    #[must_use]
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::replace(Span::new(offset, offset), text)
    }

    /// Removes the bytes in `span`.
    #[must_use]
    pub fn remove(span: Span) -> Self {
        Self::replace(span, "")
    }
}

/// A suggested fix attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Message identifier of the description.
    pub message_id: String,
    /// Rendered description.
    pub message: String,
    /// Edits that would apply the suggestion.
    pub edits: Vec<TextEdit>,
}

/// One finding reported by a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Name of the reporting rule.
    pub rule: String,
    /// File the tree was parsed from.
    pub file: String,
    /// Message identifier in the rule's message table.
    pub message_id: String,
    /// Rendered message.
    pub message: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Byte range the diagnostic covers.
    pub span: Span,
    /// Line/column location of `span`.
    pub loc: SourceLocation,
    /// Suggested fixes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Returns the 1-based line of the start position.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.loc.start.line
    }

    /// Returns the 1-based column of the start position.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.loc.start.column + 1
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} at {}:{}:{}\n",
            self.rule,
            self.file,
            self.line(),
            self.column()
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        for suggestion in &self.suggestions {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.file,
            self.line(),
            self.column(),
            self.severity,
            self.rule,
            self.message
        )
    }
}

/// Converts a [`Diagnostic`] to a miette diagnostic for rich error display.
#[derive(Debug, thiserror::Error, MietteDiagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(d: &Diagnostic) -> Self {
        Self {
            message: format!("[{}] {}", d.rule, d.message),
            help: d.suggestions.first().map(|s| s.message.clone()),
            span: SourceSpan::from((d.span.start as usize, d.span.len() as usize)),
            label_message: d.message_id.clone(),
        }
    }
}

/// Result of linting one or more trees.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of trees checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_diagnostics_at(Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.has_diagnostics_at(Severity::Warning)
    }

    /// Checks if any diagnostic meets or exceeds the given severity.
    #[must_use]
    pub fn has_diagnostics_at(&self, severity: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity >= severity)
    }

    /// Returns diagnostics filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Returns diagnostics reported by `rule`.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.rule == rule).collect()
    }

    /// Counts diagnostics by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Formats diagnostics at or above `fail_on` as a multi-line report.
    #[must_use]
    pub fn format_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Diagnostic> = self
            .diagnostics
            .iter()
            .filter(|d| d.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(report, "\n=== lintkit: {} problem(s) ===\n", failing.len());

        for d in &failing {
            let _ = writeln!(report, "{}", d.format());
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );

        report
    }

    /// Adds diagnostics from another result.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintkit_ast::Position;

    fn make_diagnostic(severity: Severity) -> Diagnostic {
        Diagnostic {
            rule: "no-unused-expressions".to_string(),
            file: "src/a.ts".to_string(),
            message_id: "unusedExpression".to_string(),
            message: "Expected an assignment or function call and instead saw an expression."
                .to_string(),
            severity,
            span: Span::new(0, 5),
            loc: SourceLocation::new(Position::new(1, 0), Position::new(1, 5)),
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn display_uses_one_based_columns() {
        let d = make_diagnostic(Severity::Error);
        insta::assert_snapshot!(d.to_string(), @"src/a.ts:1:1: error [no-unused-expressions] Expected an assignment or function call and instead saw an expression.");
    }

    #[test]
    fn has_diagnostics_at_error_only() {
        let mut result = LintResult::new();
        result.diagnostics.push(make_diagnostic(Severity::Warning));
        assert!(!result.has_diagnostics_at(Severity::Error));
        assert!(result.has_warnings());
        assert!(!result.has_errors());
    }

    #[test]
    fn format_report_filters_by_severity() {
        let mut result = LintResult::new();
        result.files_checked = 5;
        result.diagnostics.push(make_diagnostic(Severity::Warning));
        result.diagnostics.push(make_diagnostic(Severity::Error));

        let report = result.format_report(Severity::Error);
        assert!(report.contains("1 problem(s)"));
        assert!(report.contains("1 error(s), 1 warning(s), 0 info(s) in 5 file(s)"));
    }

    #[test]
    fn format_includes_suggestions() {
        let mut d = make_diagnostic(Severity::Error);
        d.suggestions.push(Suggestion {
            message_id: "remove".to_string(),
            message: "Remove the expression.".to_string(),
            edits: vec![TextEdit::remove(Span::new(0, 5))],
        });
        assert!(d.format().contains("= help: Remove the expression."));

        let report = DiagnosticReport::from(&d);
        assert_eq!(report.help.as_deref(), Some("Remove the expression."));
        assert_eq!(report.span, SourceSpan::from((0, 5)));
    }

    #[test]
    fn extend_accumulates_in_order() {
        let mut a = LintResult {
            diagnostics: vec![make_diagnostic(Severity::Error)],
            files_checked: 1,
        };
        let b = LintResult {
            diagnostics: vec![make_diagnostic(Severity::Info)],
            files_checked: 1,
        };
        a.extend(b);
        assert_eq!(a.files_checked, 2);
        assert_eq!(a.diagnostics[1].severity, Severity::Info);
    }

    #[test]
    fn diagnostic_serializes_camel_case() {
        let json = serde_json::to_value(make_diagnostic(Severity::Error)).expect("serialize");
        assert_eq!(json["messageId"], "unusedExpression");
        assert_eq!(json["span"], serde_json::json!([0, 5]));
        assert!(json.get("suggestions").is_none());
    }
}
