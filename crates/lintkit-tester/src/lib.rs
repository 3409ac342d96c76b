//! # lintkit-tester
//!
//! Table-driven testing for lintkit rules.
//!
//! A [`RuleTester`] runs one rule over lists of valid and invalid cases. Each
//! case carries a [`SourceTree`] and optional rule options. Before the rule
//! runs, the options are validated against the rule's resolved options schema
//! and then merged with the rule's defaults, exactly as a configured
//! [`Linter`](lintkit_core::Linter) would.
//!
//! ## Example
//!
//! ```ignore
//! use lintkit_tester::{ExpectedError, InvalidCase, RuleTester, ValidCase};
//!
//! RuleTester::new(MaxParams::new())
//!     .valid(ValidCase::new("two params", two_param_tree()))
//!     .invalid(
//!         InvalidCase::new("four params", four_param_tree())
//!             .error(ExpectedError::message_id("exceed").at(1, 1)),
//!     )
//!     .run();
//! ```
//!
//! Set `RUST_LOG=lintkit=debug` to see dispatch and option resolution while a
//! case runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod validator;

pub use validator::validate;

use lintkit_ast::SourceTree;
use lintkit_core::{
    dispatch, resolve_options, resolve_options_schema, CreateContext, Diagnostic, DispatchError,
    OptionsError, Rule, RuleError, RuleRun,
};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A case the rule must not report on.
#[derive(Debug)]
pub struct ValidCase {
    name: String,
    tree: SourceTree,
    options: Vec<Value>,
    filename: String,
}

impl ValidCase {
    /// Creates a case named `name` over `tree`, with no options.
    #[must_use]
    pub fn new(name: impl Into<String>, tree: SourceTree) -> Self {
        Self {
            name: name.into(),
            tree,
            options: Vec::new(),
            filename: "file.ts".to_string(),
        }
    }

    /// Sets the option slots.
    #[must_use]
    pub fn options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }

    /// Sets the file name handed to the rule.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// A case the rule must report on.
#[derive(Debug)]
pub struct InvalidCase {
    case: ValidCase,
    errors: Vec<ExpectedError>,
}

impl InvalidCase {
    /// Creates a case named `name` over `tree`, with no options.
    #[must_use]
    pub fn new(name: impl Into<String>, tree: SourceTree) -> Self {
        Self {
            case: ValidCase::new(name, tree),
            errors: Vec::new(),
        }
    }

    /// Sets the option slots.
    #[must_use]
    pub fn options(mut self, options: Vec<Value>) -> Self {
        self.case = self.case.options(options);
        self
    }

    /// Sets the file name handed to the rule.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.case = self.case.filename(filename);
        self
    }

    /// Appends an expected diagnostic.
    #[must_use]
    pub fn error(mut self, error: ExpectedError) -> Self {
        self.errors.push(error);
        self
    }
}

/// One expected diagnostic. Fields left unset are not compared.
///
/// Lines are 1-based. Columns are 1-based as displayed to users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedError {
    /// Expected message id.
    pub message_id: Option<String>,
    /// Expected rendered message.
    pub message: Option<String>,
    /// Expected start line.
    pub line: Option<u32>,
    /// Expected start column.
    pub column: Option<u32>,
    /// Expected end line.
    pub end_line: Option<u32>,
    /// Expected end column.
    pub end_column: Option<u32>,
}

impl ExpectedError {
    /// Expects a diagnostic with `message_id`.
    #[must_use]
    pub fn message_id(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            ..Self::default()
        }
    }

    /// Expects a diagnostic with the rendered `message`.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Expects the diagnostic to start at `line`:`column`.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Expects the diagnostic to end at `line`:`column`.
    #[must_use]
    pub fn end(mut self, line: u32, column: u32) -> Self {
        self.end_line = Some(line);
        self.end_column = Some(column);
        self
    }
}

/// Why a single case failed.
#[derive(Debug, Error)]
pub enum TesterError {
    /// The case's options do not satisfy the rule's options schema.
    #[error("options do not match the rule schema: {}", .errors.join("; "))]
    InvalidOptions {
        /// One message per violation.
        errors: Vec<String>,
    },

    /// The options could not be resolved.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The rule failed to build its handlers.
    #[error("rule failed to initialize: {0}")]
    Create(RuleError),

    /// A handler failed during traversal.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// An invalid case lists no expected errors.
    #[error("invalid case must expect at least one error")]
    NoExpectedErrors,

    /// An expected message id is not in the rule's message table.
    #[error("expected message id `{0}` is not defined by the rule")]
    UnknownMessageId(String),

    /// The rule reported a different number of diagnostics.
    #[error("expected {expected} error(s), got {actual}:{}", list(.found))]
    ErrorCount {
        /// Expected count.
        expected: usize,
        /// Actual count.
        actual: usize,
        /// The diagnostics that were reported.
        found: Vec<String>,
    },

    /// A reported diagnostic differs from its expectation.
    #[error("error {index}: expected {field} {expected}, got {actual}")]
    Mismatch {
        /// Position of the diagnostic.
        index: usize,
        /// Compared field.
        field: &'static str,
        /// Expected value.
        expected: String,
        /// Actual value.
        actual: String,
    },
}

fn list(found: &[String]) -> String {
    found.iter().map(|f| format!("\n      {f}")).collect()
}

/// A failed case.
#[derive(Debug)]
pub struct CaseFailure {
    /// `valid` or `invalid`.
    pub group: &'static str,
    /// Case name.
    pub case: String,
    /// Why it failed.
    pub error: TesterError,
}

/// Every case failure of one [`RuleTester::check`] call.
#[derive(Debug)]
pub struct TestFailure {
    /// Rule under test.
    pub rule: String,
    /// The failures, valid cases first.
    pub failures: Vec<CaseFailure>,
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "rule `{}` failed {} case(s):",
            self.rule,
            self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(
                f,
                "  - [{}] {}: {}",
                failure.group, failure.case, failure.error
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for TestFailure {}

/// Runs one rule over valid and invalid cases.
pub struct RuleTester {
    rule: Box<dyn Rule>,
    valid: Vec<ValidCase>,
    invalid: Vec<InvalidCase>,
}

impl RuleTester {
    /// Creates a tester for `rule`.
    #[must_use]
    pub fn new<R: Rule + 'static>(rule: R) -> Self {
        Self {
            rule: Box::new(rule),
            valid: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Adds a valid case.
    #[must_use]
    pub fn valid(mut self, case: ValidCase) -> Self {
        self.valid.push(case);
        self
    }

    /// Adds an invalid case.
    #[must_use]
    pub fn invalid(mut self, case: InvalidCase) -> Self {
        self.invalid.push(case);
        self
    }

    /// Runs every case and panics with a report if any fails.
    ///
    /// # Panics
    ///
    /// Panics if a case fails.
    pub fn run(&self) {
        if let Err(failure) = self.check() {
            panic!("{failure}");
        }
    }

    /// Runs every case.
    ///
    /// # Errors
    ///
    /// Returns every case failure.
    pub fn check(&self) -> Result<(), TestFailure> {
        init_tracing();
        let mut failures = Vec::new();

        for case in &self.valid {
            let outcome = self.lint(case).and_then(|found| {
                if found.is_empty() {
                    Ok(())
                } else {
                    Err(count_error(0, &found))
                }
            });
            if let Err(error) = outcome {
                failures.push(CaseFailure {
                    group: "valid",
                    case: case.name.clone(),
                    error,
                });
            }
        }

        for case in &self.invalid {
            if let Err(error) = self.check_invalid(case) {
                failures.push(CaseFailure {
                    group: "invalid",
                    case: case.case.name.clone(),
                    error,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TestFailure {
                rule: self.rule.name().to_string(),
                failures,
            })
        }
    }

    fn check_invalid(&self, case: &InvalidCase) -> Result<(), TesterError> {
        if case.errors.is_empty() {
            return Err(TesterError::NoExpectedErrors);
        }
        let messages = self.rule.messages();
        if let Some(unknown) = case
            .errors
            .iter()
            .filter_map(|e| e.message_id.as_deref())
            .find(|id| messages.get(id).is_none())
        {
            return Err(TesterError::UnknownMessageId(unknown.to_string()));
        }

        let found = self.lint(&case.case)?;
        if found.len() != case.errors.len() {
            return Err(count_error(case.errors.len(), &found));
        }
        for (index, (expected, actual)) in case.errors.iter().zip(&found).enumerate() {
            compare(index, expected, actual)?;
        }
        Ok(())
    }

    fn lint(&self, case: &ValidCase) -> Result<Vec<Diagnostic>, TesterError> {
        let rule = self.rule.as_ref();
        let schema = resolve_options_schema(&rule.schema()).to_json();
        let errors = validate(&schema, &Value::Array(case.options.clone()));
        if !errors.is_empty() {
            return Err(TesterError::InvalidOptions { errors });
        }

        let options = resolve_options(rule, case.options.clone())?;
        debug!(rule = rule.name(), case = %case.name, options = ?options.raw(), "running case");
        let handlers = rule
            .create(&CreateContext::new(rule.name(), &case.filename), &options)
            .map_err(TesterError::Create)?;
        let mut runs = [RuleRun {
            rule: rule.name(),
            messages: rule.messages(),
            severity: rule.default_severity(),
            options: &options,
            handlers,
        }];
        let mut found = Vec::new();
        dispatch(&case.tree, &case.filename, &mut runs, &mut found)?;
        Ok(found)
    }
}

fn count_error(expected: usize, found: &[Diagnostic]) -> TesterError {
    TesterError::ErrorCount {
        expected,
        actual: found.len(),
        found: found.iter().map(ToString::to_string).collect(),
    }
}

fn compare(index: usize, expected: &ExpectedError, actual: &Diagnostic) -> Result<(), TesterError> {
    let mismatch = |field, expected: String, actual: String| TesterError::Mismatch {
        index,
        field,
        expected,
        actual,
    };
    if let Some(id) = &expected.message_id {
        if *id != actual.message_id {
            return Err(mismatch("message id", id.clone(), actual.message_id.clone()));
        }
    }
    if let Some(message) = &expected.message {
        if *message != actual.message {
            return Err(mismatch("message", message.clone(), actual.message.clone()));
        }
    }
    let positions = [
        ("line", expected.line, actual.loc.start.line),
        ("column", expected.column, actual.loc.start.column + 1),
        ("end line", expected.end_line, actual.loc.end.line),
        ("end column", expected.end_column, actual.loc.end.column + 1),
    ];
    for (field, want, got) in positions {
        if let Some(want) = want {
            if want != got {
                return Err(mismatch(field, want.to_string(), got.to_string()));
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
