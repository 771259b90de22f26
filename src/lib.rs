//! Docvet: policy-based structural validation for documentation build
//! configurations.
//!
//! A documentation build pipeline combines documentation sources and code
//! sections pulled from remote repositories into generated, localized
//! output. Before any build work begins, the declarative configuration
//! driving it (`.docs.yml`) is validated against a policy tree describing
//! the expected fields, their types, their cardinality (scalar vs. list),
//! and extra/missing-field enforcement at two severities.
//!
//! The validation engine is generic: any `serde_yaml` mapping can be checked
//! against any [`policy::MapPolicy`]. The built-in documentation policy and
//! the `docvet` CLI are thin layers on top of it.
//!
//! ```
//! use docvet::policy::{MapPolicy, Policy, predicates::is_str};
//! use docvet::validate::validate;
//!
//! let policy = MapPolicy::new()
//!     .deny_unknown()
//!     .require(["name"])
//!     .field("name", Policy::predicate("is_str", is_str));
//!
//! let config = docvet::config::from_yaml("name: docs").unwrap();
//! let report = validate(&config, &policy).unwrap();
//! assert!(report.passed());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod policy;
pub mod validate;
