//! Submit command handler

use super::{load_inputs, print_outcome};
use enroll_check::config::Config;
use enroll_check::core::models::SelectionState;
use enroll_check::core::report::{
    HtmlReporter, MarkdownReporter, ReportFormat, ReportGenerator, SummaryContext,
};
use enroll_check::core::submission::{assemble, CsvSink, SubmissionSink, SystemClock};
use enroll_check::core::validate::validate_all;
use enroll_check::{error, info};
use std::path::{Path, PathBuf};

/// Run the submit command.
///
/// Validates the selection and, only when every rule passes, appends the
/// flattened submission rows to the CSV sink and optionally renders a
/// printable summary.
pub fn run(
    catalog_path: &Path,
    selections_path: &Path,
    policy_path: Option<&Path>,
    output: Option<&Path>,
    report: Option<&str>,
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

    // Parse the report format up front so a typo fails before any write
    let report_format = report.map(|f| match f.parse::<ReportFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    });

    let mut state = SelectionState::new();
    request.apply(&catalog, &mut state);

    let outcome = validate_all(&catalog, &state, &policy);
    if !outcome.valid {
        print_outcome(&outcome);
        eprintln!("\n✗ Submission refused: the selection is not valid.");
        std::process::exit(1);
    }

    let rows = match assemble(
        &request.student_name,
        &request.student_id,
        &catalog,
        &state,
        &SystemClock,
    ) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Submission assembly failed: {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let out_dir = PathBuf::from(&config.paths.out_dir);
    let output_path = output.map_or_else(|| out_dir.join("submissions.csv"), Path::to_path_buf);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("✗ Failed to create output directory {}: {e}", parent.display());
                std::process::exit(1);
            }
        }
    }

    let mut sink = CsvSink::new(&output_path);
    if let Err(e) = sink.append(&rows) {
        error!("Failed to append submission rows: {e}");
        eprintln!("✗ Failed to write submission to {}: {e}", output_path.display());
        std::process::exit(1);
    }

    println!(
        "✓ Recorded {} course(s) for {} ({}) in {}",
        rows.len(),
        request.student_name,
        request.student_id,
        output_path.display()
    );

    if let Some(format) = report_format {
        let ctx = SummaryContext::new(
            &request.student_name,
            &request.student_id,
            &catalog,
            &state,
        );
        let filename = format!(
            "{}_{}_수강신청.{}",
            request.student_id,
            request.student_name,
            format.extension()
        );
        let summary_path = output_path
            .parent()
            .map_or_else(|| PathBuf::from(&filename), |dir| dir.join(&filename));

        let result = match format {
            ReportFormat::Markdown => MarkdownReporter::new().generate(&ctx, &summary_path),
            ReportFormat::Html => HtmlReporter::new().generate(&ctx, &summary_path),
        };

        match result {
            Ok(()) => {
                println!("✓ Summary generated: {}", summary_path.display());
                info!("Summary generated: {}", summary_path.display());
            }
            Err(e) => {
                eprintln!("✗ Failed to generate summary: {e}");
                std::process::exit(1);
            }
        }
    }

    if verbose {
        let ctx = SummaryContext::new(
            &request.student_name,
            &request.student_id,
            &catalog,
            &state,
        );
        println!("\n=== Submission Summary ===");
        for (slot, courses) in ctx.selected_by_slot() {
            println!("{slot}: {} course(s), {} hours", courses.len(), ctx.slot_hours(slot));
        }
        println!("Total hours: {}", ctx.overall_hours());
    }
}
