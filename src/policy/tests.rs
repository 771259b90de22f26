//! Tests for the policy model and the built-in documentation policy.

use serde_yaml::{Mapping, Value};

use crate::validate::{DiagnosticKind, Severity, ValidationReport, validate};

use super::predicates::is_str;
use super::{MapPolicy, Policy, docs_policy};

fn mapping(yaml: &str) -> Mapping {
    match serde_yaml::from_str(yaml).unwrap() {
        Value::Mapping(map) => map,
        other => panic!("test data must be a mapping, got {:?}", other),
    }
}

fn check_docs(yaml: &str) -> ValidationReport {
    validate(&mapping(yaml), &docs_policy()).unwrap()
}

const VALID_CONFIG: &str = r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
  locales:
    - fr
    - en
  docs:
    from: website
    files:
      plus: "docs/*"
      to: .
  code:
    api:
      from: website-api
      templates: python
      files:
        - plus: "src/**"
          minus: "src/tests/*"
          to: api
"#;

#[test]
fn builder_exposes_declared_structure() {
    let policy = MapPolicy::new()
        .deny_unknown()
        .require(["repo"])
        .recommend(["release"])
        .field("repo", Policy::predicate("is_str", is_str))
        .wildcard(Policy::predicate("is_str", is_str));

    assert!(policy.get("repo").is_some());
    assert!(policy.get("version").is_none());
    assert!(policy.wildcard_policy().is_some());
    assert!(policy.required(Severity::Error).contains("repo"));
    assert!(policy.required(Severity::Warning).contains("release"));
    assert_eq!(policy.unknown_fields(), Some(Severity::Error));
}

#[test]
fn unknown_field_enforcement_defaults_to_off() {
    let policy = MapPolicy::new();
    assert_eq!(policy.unknown_fields(), None);
    assert!(policy.required(Severity::Error).is_empty());
}

#[test]
fn representative_configuration_passes_cleanly() {
    let report = check_docs(VALID_CONFIG);
    assert!(report.passed());
    assert!(report.warnings.is_empty());
}

#[test]
fn missing_repo_is_fatal() {
    let report = check_docs(
        r#"
website:
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
"#,
    );
    let error = report.error.expect("expected a fatal diagnostic");
    assert_eq!(
        error.kind,
        DiagnosticKind::MissingFields {
            fields: vec!["repo".to_string()]
        }
    );
    assert_eq!(error.path_string(), "website");
}

#[test]
fn unknown_project_field_is_fatal() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
  sources: [a, b]
"#,
    );
    let error = report.error.expect("expected a fatal diagnostic");
    assert_eq!(
        error.kind,
        DiagnosticKind::UnexpectedField {
            field: "sources".to_string()
        }
    );
}

#[test]
fn numeric_version_is_accepted() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: 2.1
  copyright: "2019, Docs Team"
  release: "2.1.0"
"#,
    );
    assert!(report.passed());
}

#[test]
fn invalid_glob_pattern_is_fatal() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
  docs:
    from: website
    files:
      plus: "docs/[unclosed"
      to: .
"#,
    );
    let error = report.error.expect("expected a fatal diagnostic");
    assert_eq!(
        error.kind,
        DiagnosticKind::PredicateFailed {
            field: "plus".to_string(),
            check: "is_glob".to_string()
        }
    );
    assert_eq!(error.path_string(), "website:docs:files:#:plus:#");
}

#[test]
fn invalid_locale_is_fatal_with_element_position() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
  locales: [fr, french]
"#,
    );
    let error = report.error.expect("expected a fatal diagnostic");
    assert_eq!(
        error.kind,
        DiagnosticKind::PredicateFailed {
            field: "locales".to_string(),
            check: "is_locale".to_string()
        }
    );
    assert_eq!(error.path_string(), "website:locales:#1");
}

#[test]
fn section_without_templates_warns() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
  code:
    api:
      from: website-api
      files:
        - plus: "src/**"
          to: api
"#,
    );
    assert!(report.passed());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warnings[0].kind,
        DiagnosticKind::MissingFields {
            fields: vec!["templates".to_string()]
        }
    );
    assert_eq!(report.warnings[0].path_string(), "website:code:api");
}

#[test]
fn project_without_copyright_and_release_warns() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
"#,
    );
    assert!(report.passed());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warnings[0].kind,
        DiagnosticKind::MissingFields {
            fields: vec!["copyright".to_string(), "release".to_string()]
        }
    );
}

#[test]
fn files_group_without_destination_warns() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
  docs:
    from: website
    files:
      plus: "docs/*"
"#,
    );
    assert!(report.passed());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(
        report.warnings[0].kind,
        DiagnosticKind::MissingFields {
            fields: vec!["to".to_string()]
        }
    );
    assert_eq!(report.warnings[0].path_string(), "website:docs:files:#");
}

#[test]
fn multiple_projects_are_validated_independently() {
    let report = check_docs(
        r#"
website:
  repo: website-docs
  version: "2.1"
  copyright: "2019, Docs Team"
  release: "2.1.0"
intranet:
  version: "0.3"
  copyright: "2019, Docs Team"
  release: "0.3.0"
"#,
    );
    let error = report.error.expect("expected a fatal diagnostic");
    assert_eq!(error.path_string(), "intranet");
}
