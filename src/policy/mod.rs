//! Policy trees: the declarative schema a configuration is validated against.
//!
//! This module provides the typed policy data model (`Policy`, `MapPolicy`,
//! `Check`), the named-predicate library, and the built-in policy for
//! documentation build configurations.

mod docs;
mod node;
pub mod predicates;

#[cfg(test)]
mod tests;

pub use docs::docs_policy;
pub use node::{Check, MapPolicy, Policy, PredicateFn, ValueKind};
