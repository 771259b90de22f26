//! The recursive policy-exploration engine.
//!
//! Walks a configuration mapping depth-first, resolving the applicable
//! policy for every field, checking scalar values against leaf policies,
//! and running the per-node missing-field checks. The first fatal
//! diagnostic aborts the traversal; warnings accumulate along the way.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::policy::{Check, MapPolicy, Policy, ValueKind};

use super::branch::{self, Segment};
use super::diagnostics::{Diagnostic, DiagnosticKind, Severity, ValidationReport};

/// A malformed policy tree: the traversal descended to a branch the policy
/// has no node for. This is an error in the policy itself, not in the
/// validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A branch segment could not be resolved (no declared field of that
    /// name, no wildcard where one is needed).
    #[error("no policy node for '{segment}' at branch {path} (missing wildcard or sub-policy)")]
    Unresolved { segment: String, path: String },

    /// The node at this branch has the wrong shape for the descent, e.g. a
    /// leaf where a sub-policy is needed, or a nested list-policy.
    #[error("policy node at branch {path} is not a {expected}")]
    WrongNodeKind { path: String, expected: &'static str },
}

impl PolicyError {
    fn unresolved(segment: &Segment, prefix: &[Segment]) -> Self {
        PolicyError::Unresolved {
            segment: segment.to_string(),
            path: branch::render(prefix),
        }
    }

    fn wrong_kind(prefix: &[Segment], expected: &'static str) -> Self {
        PolicyError::WrongNodeKind {
            path: branch::render(prefix),
            expected,
        }
    }
}

/// Validate a configuration mapping against a policy tree.
///
/// Returns the accumulated report: all warnings emitted up to the point the
/// traversal ended, and the first fatal diagnostic if one was found. An
/// `Err` is only returned for a malformed policy tree, never for a problem
/// with the configuration.
///
/// Both trees are read-only; validating the same pair twice yields the same
/// report.
pub fn validate(config: &Mapping, policy: &MapPolicy) -> Result<ValidationReport, PolicyError> {
    let mut explorer = Explorer {
        root: policy,
        warnings: Vec::new(),
    };
    let mut branch = Vec::new();
    let mut named = Vec::new();
    match explorer.explore(config, &mut branch, &mut named) {
        Ok(()) => Ok(ValidationReport {
            warnings: explorer.warnings,
            error: None,
        }),
        Err(Halt::Fatal(diagnostic)) => Ok(ValidationReport {
            warnings: explorer.warnings,
            error: Some(diagnostic),
        }),
        Err(Halt::Policy(err)) => Err(err),
    }
}

/// Short-circuiting signal for the traversal.
enum Halt {
    /// First fatal diagnostic; ends the run, warnings are kept.
    Fatal(Diagnostic),
    /// Malformed policy tree; ends the run with a programmer error.
    Policy(PolicyError),
}

impl From<PolicyError> for Halt {
    fn from(err: PolicyError) -> Self {
        Halt::Policy(err)
    }
}

/// How a field name resolved against the policy keys of its level.
enum SeenKey {
    /// The field is explicitly declared.
    Explicit(String),
    /// The field fell back to the wildcard (or is unconstrained).
    Wildcard,
}

impl SeenKey {
    fn name(&self) -> &str {
        match self {
            SeenKey::Explicit(name) => name,
            SeenKey::Wildcard => "*",
        }
    }

    fn segment(&self) -> Segment {
        match self {
            SeenKey::Explicit(name) => Segment::Key(name.clone()),
            SeenKey::Wildcard => Segment::Wildcard,
        }
    }
}

struct FieldCheck {
    resolved: SeenKey,
    /// Whether the explorer should descend into this (mapping) value.
    recurse: bool,
}

struct Explorer<'p> {
    root: &'p MapPolicy,
    warnings: Vec<Diagnostic>,
}

impl Explorer<'_> {
    /// Walk one configuration mapping: check every field, recurse into
    /// nested mappings, then check this level for missing fields.
    fn explore(
        &mut self,
        map: &Mapping,
        branch: &mut Vec<Segment>,
        named: &mut Vec<String>,
    ) -> Result<(), Halt> {
        let mut seen = BTreeSet::new();
        for (key, value) in map {
            let key = key_name(key, named)?;
            let outcome = self.check_field(branch, named, &key, value)?;
            if let (true, Value::Mapping(child)) = (outcome.recurse, value) {
                branch.push(outcome.resolved.segment());
                named.push(key.clone());
                let result = self.explore(child, branch, named);
                named.pop();
                branch.pop();
                result?;
            }
            seen.insert(outcome.resolved.name().to_string());
        }
        self.check_missing(branch, named, &seen)
    }

    /// Resolve the policy for one field and check its value against it.
    fn check_field(
        &mut self,
        branch: &mut Vec<Segment>,
        named: &mut Vec<String>,
        key: &str,
        value: &Value,
    ) -> Result<FieldCheck, Halt> {
        let node = solve(self.root, branch)?;
        let (resolved, rule) = match node.get(key) {
            Some(rule) => (SeenKey::Explicit(key.to_string()), Some(rule)),
            None => (SeenKey::Wildcard, node.wildcard_policy()),
        };

        if matches!(resolved, SeenKey::Wildcard) {
            match node.unknown_fields() {
                Some(Severity::Error) => {
                    return Err(Halt::Fatal(Diagnostic::error(
                        DiagnosticKind::UnexpectedField {
                            field: key.to_string(),
                        },
                        named,
                    )));
                }
                Some(Severity::Warning) => self.warnings.push(Diagnostic::warning(
                    DiagnosticKind::UnexpectedField {
                        field: key.to_string(),
                    },
                    named,
                )),
                None => {}
            }
        }

        let Some(rule) = rule else {
            // Unconstrained field: no check here. A mapping value is still
            // descended into, which surfaces the missing policy node.
            return Ok(FieldCheck {
                recurse: value.is_mapping(),
                resolved,
            });
        };

        let recurse = match rule {
            Policy::List(inner) => {
                self.check_list(inner, value, key, &resolved, branch, named)?;
                // List elements that are mappings were already explored.
                false
            }
            rule => {
                self.check_leaf(rule, value, key, named)?;
                value.is_mapping()
            }
        };
        Ok(FieldCheck { resolved, recurse })
    }

    /// Check a value against a list-policy: sequences element-wise, a bare
    /// value as a single promoted element.
    fn check_list(
        &mut self,
        inner: &Policy,
        value: &Value,
        key: &str,
        resolved: &SeenKey,
        branch: &mut Vec<Segment>,
        named: &mut Vec<String>,
    ) -> Result<(), Halt> {
        match value {
            Value::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.check_element(inner, item, key, resolved, format!("#{}", i), branch, named)?;
                }
                Ok(())
            }
            item => self.check_element(inner, item, key, resolved, "#".to_string(), branch, named),
        }
    }

    /// Check one list element: mappings are explored as sub-trees under the
    /// inner policy, anything else goes through the leaf check. The named
    /// branch gains the field name and the positional marker either way.
    fn check_element(
        &mut self,
        inner: &Policy,
        item: &Value,
        key: &str,
        resolved: &SeenKey,
        marker: String,
        branch: &mut Vec<Segment>,
        named: &mut Vec<String>,
    ) -> Result<(), Halt> {
        named.push(key.to_string());
        named.push(marker);
        let result = if let Value::Mapping(map) = item {
            branch.push(resolved.segment());
            branch.push(Segment::Element);
            let result = self.explore(map, branch, named);
            branch.pop();
            branch.pop();
            result
        } else {
            self.check_leaf(inner, item, key, named)
        };
        named.pop();
        named.pop();
        result
    }

    /// Check a single value against a non-list policy node.
    fn check_leaf(
        &mut self,
        rule: &Policy,
        value: &Value,
        field: &str,
        named: &[String],
    ) -> Result<(), Halt> {
        match rule {
            Policy::Leaf(Check::Predicate { name, test }) => {
                if value.is_mapping() {
                    // A predicate expects a scalar, not a nested mapping.
                    Err(Halt::Fatal(Diagnostic::error(
                        DiagnosticKind::StructuralMismatch {
                            field: field.to_string(),
                            expected: "scalar".to_string(),
                            actual: ValueKind::Mapping.to_string(),
                        },
                        named,
                    )))
                } else if !test(value) {
                    Err(Halt::Fatal(Diagnostic::error(
                        DiagnosticKind::PredicateFailed {
                            field: field.to_string(),
                            check: name.to_string(),
                        },
                        named,
                    )))
                } else {
                    Ok(())
                }
            }
            Policy::Leaf(Check::TypeTemplate { expected }) => {
                let actual = ValueKind::of(value);
                if actual != *expected {
                    Err(Halt::Fatal(Diagnostic::error(
                        DiagnosticKind::StructuralMismatch {
                            field: field.to_string(),
                            expected: expected.to_string(),
                            actual: actual.to_string(),
                        },
                        named,
                    )))
                } else {
                    Ok(())
                }
            }
            Policy::Map(_) => {
                if value.is_mapping() {
                    Ok(())
                } else {
                    Err(Halt::Fatal(Diagnostic::error(
                        DiagnosticKind::StructuralMismatch {
                            field: field.to_string(),
                            expected: ValueKind::Mapping.to_string(),
                            actual: ValueKind::of(value).to_string(),
                        },
                        named,
                    )))
                }
            }
            Policy::List(_) => Err(Halt::Policy(PolicyError::WrongNodeKind {
                path: branch::render(named),
                expected: "leaf or sub-policy (nested list-policies are not supported)",
            })),
        }
    }

    /// Compare the fields seen at this level against the node's required
    /// sets. The error set is checked first and aborts; the warning set is
    /// reported and the traversal continues.
    fn check_missing(
        &mut self,
        branch: &[Segment],
        named: &[String],
        seen: &BTreeSet<String>,
    ) -> Result<(), Halt> {
        let node = solve(self.root, branch)?;

        let missing = missing_fields(node.required(Severity::Error), seen);
        if !missing.is_empty() {
            return Err(Halt::Fatal(Diagnostic::error(
                DiagnosticKind::MissingFields { fields: missing },
                named,
            )));
        }

        let missing = missing_fields(node.required(Severity::Warning), seen);
        if !missing.is_empty() {
            self.warnings.push(Diagnostic::warning(
                DiagnosticKind::MissingFields { fields: missing },
                named,
            ));
        }
        Ok(())
    }
}

/// Required fields absent from the seen set, in deterministic order.
fn missing_fields(required: &BTreeSet<String>, seen: &BTreeSet<String>) -> Vec<String> {
    required.difference(seen).cloned().collect()
}

/// Resolve the map-policy node reached by sequentially descending the policy
/// tree along the structural branch.
fn solve<'p>(root: &'p MapPolicy, branch: &[Segment]) -> Result<&'p MapPolicy, PolicyError> {
    let mut node = root;
    // A non-map policy picked up mid-descent, waiting to be unwrapped by an
    // element segment or to fail the walk.
    let mut pending: Option<&'p Policy> = None;

    for (idx, segment) in branch.iter().enumerate() {
        let prefix = &branch[..idx];
        let next = match (pending.take(), segment) {
            (None, Segment::Key(name)) => node
                .get(name)
                .ok_or_else(|| PolicyError::unresolved(segment, prefix))?,
            (None, Segment::Wildcard) => node
                .wildcard_policy()
                .ok_or_else(|| PolicyError::unresolved(segment, prefix))?,
            (None, Segment::Element) => return Err(PolicyError::wrong_kind(prefix, "list policy")),
            (Some(Policy::List(inner)), Segment::Element) => inner.as_ref(),
            (Some(_), Segment::Element) => {
                return Err(PolicyError::wrong_kind(prefix, "list policy"));
            }
            (Some(_), _) => return Err(PolicyError::wrong_kind(prefix, "sub-policy")),
        };
        match next {
            Policy::Map(map) => node = map,
            other => pending = Some(other),
        }
    }

    match pending {
        None => Ok(node),
        Some(_) => Err(PolicyError::wrong_kind(branch, "sub-policy")),
    }
}

/// Configuration mapping keys are used by name; scalar keys are taken in
/// their string form, anything else is a structural mismatch.
fn key_name(key: &Value, named: &[String]) -> Result<String, Halt> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Halt::Fatal(Diagnostic::error(
            DiagnosticKind::StructuralMismatch {
                field: "<key>".to_string(),
                expected: ValueKind::String.to_string(),
                actual: ValueKind::of(other).to_string(),
            },
            named,
        ))),
    }
}
