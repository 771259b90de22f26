//! Built-in policy for `.docs.yml` documentation build configurations.
//!
//! A configuration maps project names to project blocks. Each project names
//! the target repository and version, pulls documentation sources and code
//! sections from remote repositories, and lists the locales to generate.
//!
//! ```yaml
//! website:
//!   repo: website-docs
//!   version: "2.1"
//!   docs:
//!     from: website
//!     files:
//!       plus: "docs/*"
//!       to: .
//!   code:
//!     api:
//!       from: website-api
//!       templates: python
//!       files:
//!         - plus: "src/**"
//!           minus: "src/tests/*"
//!           to: api
//!   locales: [fr, en]
//! ```

use super::node::{MapPolicy, Policy};
use super::predicates::{is_glob, is_locale, is_str, is_str_or_number};

/// Policy for a whole `.docs.yml` document: a mapping of project names, each
/// validated against the project policy.
pub fn docs_policy() -> MapPolicy {
    MapPolicy::new().wildcard(project_policy())
}

/// Policy for one project block.
fn project_policy() -> MapPolicy {
    MapPolicy::new()
        .deny_unknown()
        .require(["repo", "version"])
        .recommend(["copyright", "release"])
        .field("code", MapPolicy::new().wildcard(section_policy()))
        .field("copyright", Policy::predicate("is_str", is_str))
        .field("docs", docs_block_policy())
        .field(
            "locales",
            Policy::list(Policy::predicate("is_locale", is_locale)),
        )
        .field("release", Policy::predicate("is_str_or_number", is_str_or_number))
        .field("repo", Policy::predicate("is_str", is_str))
        .field("version", Policy::predicate("is_str_or_number", is_str_or_number))
}

/// Policy for one named code section under `code`.
fn section_policy() -> MapPolicy {
    MapPolicy::new()
        .deny_unknown()
        .recommend(["templates"])
        .field("files", Policy::list(files_policy()))
        .field("from", Policy::predicate("is_str", is_str))
        .field("templates", Policy::list(Policy::predicate("is_str", is_str)))
}

/// Policy for the `docs` block of a project.
fn docs_block_policy() -> MapPolicy {
    MapPolicy::new()
        .deny_unknown()
        .field("files", Policy::list(files_policy()))
        .field("from", Policy::predicate("is_str", is_str))
}

/// Policy for one file-selection group: glob patterns to include and
/// exclude, and the destination directory they are copied to.
fn files_policy() -> MapPolicy {
    MapPolicy::new()
        .deny_unknown()
        .recommend(["plus", "to"])
        .field("minus", Policy::list(Policy::predicate("is_glob", is_glob)))
        .field("plus", Policy::list(Policy::predicate("is_glob", is_glob)))
        .field("to", Policy::predicate("is_str", is_str))
}
