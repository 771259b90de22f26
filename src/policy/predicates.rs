//! Named value predicates for leaf policies.
//!
//! Each predicate is a pure check on a single configuration value. The
//! predicate name recorded in the policy is what diagnostics report, so the
//! functions here are referenced together with their identifier, e.g.
//! `Policy::predicate("is_str", is_str)`.

use globset::Glob;
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

/// Locale codes as used by documentation generators: a lowercase language
/// subtag, optionally followed by a region subtag (`fr`, `en`, `pt-BR`, `zh_CN`).
static LOCALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}([-_][A-Za-z]{2,4})?$").expect("Invalid locale regex"));

/// The value is a string.
pub fn is_str(value: &Value) -> bool {
    value.is_string()
}

/// The value is a string or a number.
pub fn is_str_or_number(value: &Value) -> bool {
    value.is_string() || value.is_number()
}

/// The value is a string that parses as a file glob pattern.
pub fn is_glob(value: &Value) -> bool {
    value.as_str().is_some_and(|s| Glob::new(s).is_ok())
}

/// The value is a string that looks like a locale code.
pub fn is_locale(value: &Value) -> bool {
    value.as_str().is_some_and(|s| LOCALE_REGEX.is_match(s))
}
