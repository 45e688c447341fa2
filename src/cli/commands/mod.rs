//! CLI command handlers

pub mod config;
pub mod submit;
pub mod validate;

use enroll_check::config::Config;
use enroll_check::core::models::{CatalogIndex, SelectionRequest};
use enroll_check::core::policy::EnrollmentPolicy;
use enroll_check::core::validate::{Severity, ValidationMessage, ValidationOutcome};
use enroll_check::error;
use std::path::Path;

/// Load the catalog, selection request, and policy shared by the
/// `validate` and `submit` commands
///
/// Policy precedence: `--policy` flag, then config `policy_file`, then the
/// compiled-in institution defaults.
pub fn load_inputs(
    catalog_path: &Path,
    selections_path: &Path,
    policy_path: Option<&Path>,
    config: &Config,
) -> Result<(CatalogIndex, SelectionRequest, EnrollmentPolicy), String> {
    let catalog = CatalogIndex::load(catalog_path).map_err(|e| {
        error!("Failed to load catalog {}: {e}", catalog_path.display());
        format!("✗ {e}")
    })?;

    let content = std::fs::read_to_string(selections_path).map_err(|e| {
        format!(
            "✗ Failed to read selections '{}': {e}",
            selections_path.display()
        )
    })?;
    let request: SelectionRequest = serde_json::from_str(&content).map_err(|e| {
        format!(
            "✗ Selections '{}' is not a well-formed request: {e}",
            selections_path.display()
        )
    })?;

    let policy = if let Some(path) = policy_path {
        EnrollmentPolicy::load(path).map_err(|e| format!("✗ {e}"))?
    } else if config.paths.policy_file.is_empty() {
        EnrollmentPolicy::from_defaults()
    } else {
        EnrollmentPolicy::load(&config.paths.policy_file).map_err(|e| format!("✗ {e}"))?
    };

    Ok((catalog, request, policy))
}

/// Print one validation message with its severity marker
pub fn print_message(message: &ValidationMessage) {
    match message.severity {
        Severity::Error => println!("  ✗ {}", message.text),
        Severity::Success => println!("  ✓ {}", message.text),
        Severity::Info => println!("  - {}", message.text),
    }
}

/// Print a full validation outcome: every slot's messages, the global
/// rules, and the overall verdict
pub fn print_outcome(outcome: &ValidationOutcome) {
    for report in &outcome.semesters {
        println!(
            "\n=== {} (selected: {} hours) ===",
            report.slot, report.total_hours
        );
        for message in &report.messages {
            print_message(message);
        }
    }

    println!("\n=== Cross-semester rules ===");
    for message in &outcome.global.messages {
        print_message(message);
    }

    if outcome.valid {
        println!("\n✓ All enrollment rules are satisfied.");
    } else {
        println!("\n✗ The selection does not satisfy the enrollment rules yet.");
    }
}
