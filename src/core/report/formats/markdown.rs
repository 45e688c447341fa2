//! Markdown summary generator
//!
//! Renders the registration summary as Markdown. These summaries render
//! well in GitHub, GitLab, and VS Code, and print cleanly.

use crate::core::report::{ReportGenerator, SummaryContext};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown summary template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/summary.md");

/// Markdown summary generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the summary using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &SummaryContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{student_name}}", ctx.student_name);
        output = output.replace("{{student_id}}", ctx.student_id);
        output = output.replace("{{semester_sections}}", &Self::generate_sections(ctx));
        output = output.replace("{{overall_hours}}", &ctx.overall_hours().to_string());

        output
    }

    /// Generate the per-semester course tables
    fn generate_sections(ctx: &SummaryContext) -> String {
        let mut sections = String::new();

        for (slot, courses) in ctx.selected_by_slot() {
            let _ = writeln!(
                sections,
                "## {}학년 {}학기 선택과목\n",
                slot.year, slot.semester
            );
            sections.push_str("| 과목명 | 그룹 | 학점 |\n");
            sections.push_str("|---|---|---|\n");

            for course in &courses {
                let _ = writeln!(
                    sections,
                    "| {} | {} | {} |",
                    course.name, course.group, course.hours
                );
            }

            let _ = writeln!(
                sections,
                "\n**{}학년 {}학기 총 학점:** {}\n",
                slot.year,
                slot.semester,
                ctx.slot_hours(slot)
            );
        }

        sections
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &SummaryContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }

    fn render(&self, ctx: &SummaryContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
