//! Selection state: the set of chosen course ids per registration slot

use super::catalog::CatalogIndex;
use super::course::Slot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The student's current course selections, keyed by slot
///
/// Lives for one registration session: created empty, seeded with the
/// mandatory courses, mutated by toggle events, then discarded. There is a
/// single mutator; `&mut self` is the atomicity unit, so no toggle can lose
/// an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeMap<Slot, BTreeSet<String>>,
}

impl SelectionState {
    /// Create an empty selection state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: BTreeMap::new(),
        }
    }

    /// Insert every mandatory course id into its slot's set
    ///
    /// Idempotent: seeding twice leaves the state unchanged.
    pub fn seed_mandatory(&mut self, catalog: &CatalogIndex) {
        for course in catalog.courses() {
            if course.mandatory {
                self.selected
                    .entry(course.slot())
                    .or_default()
                    .insert(course.id.clone());
            }
        }
    }

    /// Select or deselect a course in a slot
    ///
    /// Mandatory courses cannot be removed; any toggle against one is a
    /// no-op regardless of the requested state. Ids unknown to the catalog
    /// or not offered in `slot` are also no-ops.
    ///
    /// # Returns
    /// `true` if the state changed
    pub fn toggle(
        &mut self,
        catalog: &CatalogIndex,
        slot: Slot,
        course_id: &str,
        desired: bool,
    ) -> bool {
        let Some(course) = catalog.by_id(course_id) else {
            crate::debug!("Ignoring toggle for unknown course id '{course_id}'");
            return false;
        };
        if course.slot() != slot {
            crate::debug!(
                "Ignoring toggle for '{course_id}': offered in {}, not {slot}",
                course.slot()
            );
            return false;
        }
        if course.mandatory {
            return false;
        }

        let set = self.selected.entry(slot).or_default();
        if desired {
            set.insert(course_id.to_string())
        } else {
            set.remove(course_id)
        }
    }

    /// Get the selected course ids for a slot
    #[must_use]
    pub fn selected_in(&self, slot: Slot) -> BTreeSet<String> {
        self.selected.get(&slot).cloned().unwrap_or_default()
    }

    /// Whether a course id is currently selected (in any slot)
    #[must_use]
    pub fn is_selected(&self, course_id: &str) -> bool {
        self.selected.values().any(|set| set.contains(course_id))
    }

    /// Union of selected ids over all slots
    #[must_use]
    pub fn all_selected(&self) -> BTreeSet<String> {
        self.selected.values().flatten().cloned().collect()
    }

    /// Slots that have at least one selection, ascending
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        self.selected
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(&slot, _)| slot)
            .collect()
    }

    /// Total number of selected courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A submitted registration payload: student identity plus chosen course ids
///
/// This is the wire shape the original submission endpoint received
/// (`studentName`, `studentId`, `selectedCourses`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    /// Student display name
    pub student_name: String,
    /// Student id number
    pub student_id: String,
    /// Chosen course ids (electives; mandatory ids are implied)
    pub selected_courses: Vec<String>,
}

impl SelectionRequest {
    /// Apply this request to a selection state: seed the mandatory courses,
    /// then select every listed id
    ///
    /// Unknown ids and mandatory ids in the list are ignored by `toggle`'s
    /// rules, so a stale or tampered request cannot corrupt the state.
    pub fn apply(&self, catalog: &CatalogIndex, state: &mut SelectionState) {
        state.seed_mandatory(catalog);
        for id in &self.selected_courses {
            if let Some(course) = catalog.by_id(id) {
                state.toggle(catalog, course.slot(), id, true);
            } else {
                crate::warn!("Selection request names unknown course id '{id}'");
            }
        }
    }
}
