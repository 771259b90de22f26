//! Implementation of the `docvet check` command.
//!
//! Loads the `.docs.yml` of the target directory, validates it against the
//! built-in documentation policy, and reports the diagnostics.
//!
//! # Exit Codes
//!
//! - 0: Configuration passes (warnings may have been printed)
//! - 1: User error (missing/unreadable/undecodable configuration)
//! - 2: Validation failure (first fatal diagnostic)
//! - 3: Policy error (malformed built-in policy; a docvet bug)

use crate::cli::CheckArgs;
use crate::config;
use crate::error::{DocvetError, Result};
use crate::policy::docs_policy;
use crate::validate::validate;

/// Execute the `docvet check` command.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let conf = config::load(&args.dir)?;
    let policy = docs_policy();
    let report = validate(&conf, &policy)?;

    if args.json {
        for diagnostic in report.diagnostics() {
            let line = serde_json::to_string(diagnostic).map_err(|e| {
                DocvetError::UserError(format!("failed to serialize diagnostic: {}", e))
            })?;
            println!("{}", line);
        }
    } else {
        for warning in &report.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    match report.error {
        Some(diagnostic) => Err(DocvetError::ValidationError(diagnostic.to_string())),
        None => {
            if !args.json {
                println!("OK");
            }
            Ok(())
        }
    }
}
