//! Loading of `.docs.yml` configuration files.
//!
//! Decoding stops at producing the raw YAML tree; all structural checking is
//! the validation engine's job.

use crate::error::{DocvetError, Result};
use crate::policy::ValueKind;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Name of the configuration file looked up in the target directory.
pub const DOCS_FILE: &str = ".docs.yml";

/// Load the `.docs.yml` of a directory as a raw configuration mapping.
///
/// # Returns
///
/// * `Ok(Mapping)` - The decoded top-level mapping
/// * `Err(DocvetError::UserError)` - Missing/unreadable file, YAML decode
///   failure, or a non-mapping document root
pub fn load<P: AsRef<Path>>(dir: P) -> Result<Mapping> {
    let path = dir.as_ref().join(DOCS_FILE);

    let content = std::fs::read_to_string(&path).map_err(|e| {
        DocvetError::UserError(format!(
            "failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    from_yaml(&content)
}

/// Decode a configuration from a YAML string.
pub fn from_yaml(yaml: &str) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| DocvetError::UserError(format!("failed to parse configuration YAML: {}", e)))?;

    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(DocvetError::UserError(format!(
            "configuration root must be a mapping, got {}",
            ValueKind::of(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_docs_file_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DOCS_FILE), "website:\n  repo: docs\n").unwrap();

        let config = load(dir.path()).unwrap();
        assert!(config.contains_key(&Value::String("website".to_string())));
    }

    #[test]
    fn load_fails_without_docs_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, DocvetError::UserError(_)));
        assert!(err.to_string().contains(DOCS_FILE));
    }

    #[test]
    fn from_yaml_rejects_invalid_yaml() {
        let err = from_yaml("website: [unclosed").unwrap_err();
        assert!(matches!(err, DocvetError::UserError(_)));
    }

    #[test]
    fn from_yaml_rejects_non_mapping_root() {
        let err = from_yaml("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
        assert!(err.to_string().contains("sequence"));
    }
}
