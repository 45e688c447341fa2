//! Printable registration-summary generation
//!
//! This module renders a validated selection into the printable summary the
//! registration office hands out: per-semester course tables (mandatory
//! group first) with per-semester and overall credit totals, in Markdown or
//! HTML.

pub mod formats;

use crate::core::models::{CatalogIndex, Course, SelectionState, Slot, MANDATORY_GROUP};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for summary generation
///
/// Aggregates everything needed to render one student's registration
/// summary, providing a single source of truth for templates.
#[derive(Debug, Clone)]
pub struct SummaryContext<'a> {
    /// Student display name
    pub student_name: &'a str,
    /// Student id number
    pub student_id: &'a str,
    /// Course catalog
    pub catalog: &'a CatalogIndex,
    /// Selection to summarize
    pub state: &'a SelectionState,
}

impl<'a> SummaryContext<'a> {
    /// Create a new summary context
    #[must_use]
    pub const fn new(
        student_name: &'a str,
        student_id: &'a str,
        catalog: &'a CatalogIndex,
        state: &'a SelectionState,
    ) -> Self {
        Self {
            student_name,
            student_id,
            catalog,
            state,
        }
    }

    /// Selected courses grouped by slot, in print order
    ///
    /// Slots ascend; within a slot, the mandatory group comes first, then
    /// groups by name, then courses by name.
    #[must_use]
    pub fn selected_by_slot(&self) -> Vec<(Slot, Vec<&'a Course>)> {
        let mut sections = Vec::new();

        for slot in self.catalog.slots() {
            let selected = self.state.selected_in(slot);
            let mut courses: Vec<&Course> = self
                .catalog
                .courses_of(slot)
                .into_iter()
                .filter(|c| selected.contains(&c.id))
                .collect();

            if courses.is_empty() {
                continue;
            }

            courses.sort_by(|a, b| {
                let a_mandatory = a.group == MANDATORY_GROUP;
                let b_mandatory = b.group == MANDATORY_GROUP;
                b_mandatory
                    .cmp(&a_mandatory)
                    .then_with(|| a.group.cmp(&b.group))
                    .then_with(|| a.name.cmp(&b.name))
            });
            sections.push((slot, courses));
        }

        sections
    }

    /// Total selected credit hours in one slot
    #[must_use]
    pub fn slot_hours(&self, slot: Slot) -> u32 {
        let selected = self.state.selected_in(slot);
        self.catalog
            .courses_of(slot)
            .iter()
            .filter(|c| selected.contains(&c.id))
            .map(|c| c.hours)
            .sum()
    }

    /// Total selected credit hours across every slot
    #[must_use]
    pub fn overall_hours(&self) -> u32 {
        self.catalog
            .slots()
            .into_iter()
            .map(|slot| self.slot_hours(slot))
            .sum()
    }
}

/// Trait for summary generators
pub trait ReportGenerator {
    /// Generate a summary to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &SummaryContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate summary content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &SummaryContext) -> Result<String, Box<dyn Error>>;
}
