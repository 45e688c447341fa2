//! HTML summary generator
//!
//! Renders the registration summary as a self-contained HTML page with
//! embedded CSS, suitable for printing or archiving.

use crate::core::report::{ReportGenerator, SummaryContext};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML summary template
const HTML_TEMPLATE: &str = include_str!("../templates/summary.html");

/// HTML summary generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the summary using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &SummaryContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

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
                "<h2>{}학년 {}학기 선택과목</h2>",
                slot.year, slot.semester
            );
            sections.push_str("<table>\n<tr><th>과목명</th><th>그룹</th><th>학점</th></tr>\n");

            for course in &courses {
                let _ = writeln!(
                    sections,
                    "<tr><td>{}</td><td>{}</td><td class=\"hours\">{}</td></tr>",
                    course.name, course.group, course.hours
                );
            }

            sections.push_str("</table>\n");
            let _ = writeln!(
                sections,
                "<p class=\"slot-total\">{}학년 {}학기 총 학점: {}</p>",
                slot.year,
                slot.semester,
                ctx.slot_hours(slot)
            );
        }

        sections
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &SummaryContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }

    fn render(&self, ctx: &SummaryContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
