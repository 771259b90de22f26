//! The typed policy-tree data model.
//!
//! A policy tree mirrors the shape the configuration tree is expected to
//! have. Leaf checks, list cardinality, and per-node metapolicy (required
//! fields, unlisted-field enforcement, wildcard fallback) are all explicit
//! variants and fields here; no string sentinels are involved.

use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::validate::Severity;

/// Coarse runtime type of a configuration value, used by type templates and
/// structural-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
    Tagged,
}

impl ValueKind {
    /// The kind of a configuration value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Tagged(_) => ValueKind::Tagged,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Tagged => "tagged",
        };
        write!(f, "{}", name)
    }
}

/// Signature of a leaf predicate: a pure check on a single value.
pub type PredicateFn = fn(&Value) -> bool;

/// A leaf check, dispatched explicitly rather than by runtime inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// A named boolean-valued predicate over a scalar value.
    Predicate {
        name: &'static str,
        test: PredicateFn,
    },
    /// Legacy literal-template mode: the value must have this concrete kind.
    TypeTemplate { expected: ValueKind },
}

/// A node of the policy tree.
#[derive(Debug, Clone)]
pub enum Policy {
    /// A leaf check applied to a scalar configuration value.
    Leaf(Check),
    /// The configuration value may be a single item or a sequence of items,
    /// each checked against the inner policy.
    List(Box<Policy>),
    /// A sub-tree, for recursing into a nested configuration mapping.
    Map(MapPolicy),
}

impl Policy {
    /// A named predicate leaf.
    pub fn predicate(name: &'static str, test: PredicateFn) -> Self {
        Policy::Leaf(Check::Predicate { name, test })
    }

    /// A type-template leaf.
    pub fn type_of(expected: ValueKind) -> Self {
        Policy::Leaf(Check::TypeTemplate { expected })
    }

    /// A list-policy around the given inner policy.
    pub fn list(inner: impl Into<Policy>) -> Self {
        Policy::List(Box::new(inner.into()))
    }
}

impl From<MapPolicy> for Policy {
    fn from(map: MapPolicy) -> Self {
        Policy::Map(map)
    }
}

impl From<Check> for Policy {
    fn from(check: Check) -> Self {
        Policy::Leaf(check)
    }
}

/// Policy for one mapping level of the configuration tree.
///
/// `children` enumerates the explicitly recognized fields at this level.
/// Any other field falls back to the wildcard policy if one is set, and is
/// otherwise unconstrained (no check performed) unless `unknown_fields`
/// requests unexpected-field enforcement.
#[derive(Debug, Clone, Default)]
pub struct MapPolicy {
    children: BTreeMap<String, Policy>,
    wildcard: Option<Box<Policy>>,
    required_error: BTreeSet<String>,
    required_warning: BTreeSet<String>,
    unknown_fields: Option<Severity>,
}

impl MapPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an explicitly recognized field and its policy.
    pub fn field(mut self, name: impl Into<String>, policy: impl Into<Policy>) -> Self {
        self.children.insert(name.into(), policy.into());
        self
    }

    /// Set the fallback policy for fields not explicitly declared.
    pub fn wildcard(mut self, policy: impl Into<Policy>) -> Self {
        self.wildcard = Some(Box::new(policy.into()));
        self
    }

    /// Mark fields whose absence at this level is a fatal error.
    pub fn require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_error.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark fields whose absence at this level is a warning.
    pub fn recommend<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_warning
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Treat fields that match no declared policy key as a fatal error.
    pub fn deny_unknown(mut self) -> Self {
        self.unknown_fields = Some(Severity::Error);
        self
    }

    /// Treat fields that match no declared policy key as a warning.
    pub fn warn_unknown(mut self) -> Self {
        self.unknown_fields = Some(Severity::Warning);
        self
    }

    /// The policy declared for an explicitly recognized field.
    pub fn get(&self, name: &str) -> Option<&Policy> {
        self.children.get(name)
    }

    /// The fallback policy for fields not explicitly declared, if any.
    pub fn wildcard_policy(&self) -> Option<&Policy> {
        self.wildcard.as_deref()
    }

    /// The set of fields required at the given severity.
    pub fn required(&self, severity: Severity) -> &BTreeSet<String> {
        match severity {
            Severity::Error => &self.required_error,
            Severity::Warning => &self.required_warning,
        }
    }

    /// The severity of the unexpected-field check at this level, if enabled.
    pub fn unknown_fields(&self) -> Option<Severity> {
        self.unknown_fields
    }
}
