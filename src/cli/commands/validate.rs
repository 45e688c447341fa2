//! Validate command handler

use super::{load_inputs, print_outcome};
use enroll_check::config::Config;
use enroll_check::core::models::SelectionState;
use enroll_check::core::validate::validate_all;
use enroll_check::info;
use std::path::Path;

/// Run the validate command.
///
/// Loads the catalog, selection request, and policy, applies the request to
/// a fresh selection state, and prints every rule outcome. Exits nonzero
/// when loading fails or the selection is invalid.
///
/// # Arguments
/// * `catalog_path` - Course catalog JSON file
/// * `selections_path` - Selection request JSON file
/// * `policy_path` - Optional policy TOML override
/// * `config` - Loaded application configuration
/// * `verbose` - Whether to show extra progress output
pub fn run(
    catalog_path: &Path,
    selections_path: &Path,
    policy_path: Option<&Path>,
    config: &Config,
    verbose: bool,
) {
    let (catalog, request, policy) =
        match load_inputs(catalog_path, selections_path, policy_path, config) {
            Ok(inputs) => inputs,
            Err(message) => {
                eprintln!("{message}");
                std::process::exit(1);
            }
        };

    if verbose {
        println!(
            "✓ Catalog loaded: {} course(s) across {} slot(s)",
            catalog.len(),
            catalog.slots().len()
        );
    } else {
        info!("Catalog loaded from: {}", catalog_path.display());
    }

    let mut state = SelectionState::new();
    request.apply(&catalog, &mut state);

    println!(
        "Validating selection for {} ({})",
        request.student_name, request.student_id
    );

    let outcome = validate_all(&catalog, &state, &policy);
    print_outcome(&outcome);

    if !outcome.valid {
        std::process::exit(1);
    }
}
