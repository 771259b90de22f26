//! Diagnostic types emitted by the validation engine.
//!
//! Every diagnostic carries the information triple (field, check name, named
//! branch) plus a severity. Errors are fatal and abort the traversal at the
//! point of detection; warnings are retained and the traversal continues.

use serde::Serialize;
use std::fmt;

use super::branch;

/// Severity of a diagnostic, and of the per-node metapolicy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Non-fatal: recorded, traversal continues.
    Warning,
    /// Fatal: aborts the validation run at the point of detection.
    Error,
}

/// What went wrong, with the offending field name(s).
///
/// Predicate and structural failures are always fatal; only unexpected-field
/// and missing-field checks exist at warning severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A field present in the data but not declared in the policy, under a
    /// node that disallows unlisted fields.
    UnexpectedField { field: String },

    /// Fields declared required at this node but absent from the data.
    MissingFields { fields: Vec<String> },

    /// A scalar value failed its named leaf predicate.
    PredicateFailed { field: String, check: String },

    /// The value's shape does not match the policy: a mapping where a scalar
    /// was expected, a scalar where a mapping was expected, or a concrete
    /// type mismatch against a type template.
    StructuralMismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

impl DiagnosticKind {
    /// The identifying name of the failed check: the predicate name for
    /// predicate failures, a synthetic name otherwise.
    pub fn check_name(&self) -> &str {
        match self {
            DiagnosticKind::UnexpectedField { .. } => "unexpected_field",
            DiagnosticKind::MissingFields { .. } => "missing_fields",
            DiagnosticKind::PredicateFailed { check, .. } => check,
            DiagnosticKind::StructuralMismatch { .. } => "structural_mismatch",
        }
    }
}

/// A single validation finding, positioned by its named branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    /// Named branch: literal configuration keys and positional markers.
    pub path: Vec<String>,
}

impl Diagnostic {
    /// Create a fatal diagnostic at the given named branch.
    pub fn error(kind: DiagnosticKind, path: &[String]) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            path: path.to_vec(),
        }
    }

    /// Create a non-fatal diagnostic at the given named branch.
    pub fn warning(kind: DiagnosticKind, path: &[String]) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            path: path.to_vec(),
        }
    }

    /// The named branch as a colon-joined string (`<TOP>` at the root).
    pub fn path_string(&self) -> String {
        branch::render(&self.path)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path_string();
        match &self.kind {
            DiagnosticKind::UnexpectedField { field } => {
                write!(f, "unexpected field '{}' in branch {}", field, path)
            }
            DiagnosticKind::MissingFields { fields } => {
                let noun = if fields.len() == 1 { "field" } else { "fields" };
                let list = fields
                    .iter()
                    .map(|name| format!("'{}'", name))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "missing {} {} in branch {}", noun, list, path)
            }
            DiagnosticKind::PredicateFailed { field, check } => {
                write!(f, "'{}' failed the check '{}' in branch {}", field, check, path)
            }
            DiagnosticKind::StructuralMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "'{}' has a structural mismatch (expected {}, got {}) in branch {}",
                    field, expected, actual, path
                )
            }
        }
    }
}

/// Outcome of one validation call.
///
/// Warnings emitted before a fatal error are retained; diagnostics already
/// produced are never retracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Non-fatal diagnostics, in emission order.
    pub warnings: Vec<Diagnostic>,
    /// The first fatal diagnostic, if any. Traversal stopped there.
    pub error: Option<Diagnostic>,
}

impl ValidationReport {
    /// Whether validation completed without a fatal error.
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// All diagnostics in emission order, warnings first, then the fatal
    /// error if any.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.warnings.iter().chain(self.error.iter())
    }
}
