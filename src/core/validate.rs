//! Selection validation rules
//!
//! Pure functions over the catalog, the selection state, and the enrollment
//! policy. Rule violations are data (`ValidationMessage`s inside reports),
//! never errors: the caller keeps editing and revalidates after every
//! mutation. Given identical inputs these functions produce identical
//! reports.

use crate::core::models::{CatalogIndex, SelectionState, Slot};
use crate::core::policy::EnrollmentPolicy;
use std::collections::BTreeMap;

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A violated rule
    Error,
    /// A satisfied rule
    Success,
    /// Informational only
    Info,
}

/// One structured validation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    /// Message severity
    pub severity: Severity,
    /// Human-readable rule outcome, detailed enough to act on
    pub text: String,
}

impl ValidationMessage {
    fn error(text: String) -> Self {
        Self {
            severity: Severity::Error,
            text,
        }
    }

    fn success(text: String) -> Self {
        Self {
            severity: Severity::Success,
            text,
        }
    }

    fn info(text: String) -> Self {
        Self {
            severity: Severity::Info,
            text,
        }
    }

    /// Whether this message reports a violation
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

/// Validation outcome for one registration slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterReport {
    /// Slot the report covers
    pub slot: Slot,
    /// Whether every group quota and the hour total are satisfied
    pub valid: bool,
    /// Ordered messages: overall summary, one per elective group, hours
    pub messages: Vec<ValidationMessage>,
    /// Credit hours currently selected in the slot
    pub total_hours: u32,
}

/// Validation outcome for the cross-semester rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalReport {
    /// Whether every cross-semester rule is satisfied
    pub valid: bool,
    /// One message per rule (category exact, category max, name
    /// uniqueness), success or error
    pub messages: Vec<ValidationMessage>,
}

/// Combined outcome over every slot plus the global rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Per-slot reports, ascending by slot
    pub semesters: Vec<SemesterReport>,
    /// Cross-semester report
    pub global: GlobalReport,
    /// Conjunction of every per-slot validity and the global validity
    pub valid: bool,
}

/// Validate one slot's selections against its group quotas and required
/// credit hours
///
/// Both checks are exact-match: a group is satisfied only when the selected
/// count equals its quota, and the slot only when its hour total equals
/// `required_hours`.
///
/// # Arguments
/// * `catalog` - Course catalog
/// * `state` - Current selections
/// * `slot` - Slot to validate
/// * `required_hours` - Exact credit-hour total the slot must reach
#[must_use]
pub fn validate_semester(
    catalog: &CatalogIndex,
    state: &SelectionState,
    slot: Slot,
    required_hours: u32,
) -> SemesterReport {
    let selected = state.selected_in(slot);
    let groups = catalog.groups_of(slot);
    let mut messages = Vec::new();
    let mut valid = true;

    if groups.is_empty() {
        return SemesterReport {
            slot,
            valid: true,
            messages: vec![ValidationMessage::info(format!(
                "No courses are offered in {slot}"
            ))],
            total_hours: 0,
        };
    }

    for group in &groups {
        if group.is_mandatory {
            continue;
        }

        let count = group
            .courses
            .iter()
            .filter(|c| selected.contains(&c.id))
            .count();

        if group.courses.is_empty() {
            // Cannot happen for groups derived from the catalog, but an
            // empty group is unsatisfiable rather than a crash.
            messages.push(ValidationMessage::error(format!(
                "Group \"{}\" offers no courses, so its quota of {} cannot be met",
                group.name, group.quota
            )));
            valid = false;
        } else if count as u32 == group.quota {
            messages.push(ValidationMessage::success(format!(
                "Group \"{}\" complete ({count}/{} selected)",
                group.name, group.quota
            )));
        } else {
            messages.push(ValidationMessage::error(format!(
                "Select exactly {} course(s) from group \"{}\" ({count} currently selected)",
                group.quota, group.name
            )));
            valid = false;
        }
    }

    let total_hours: u32 = catalog
        .courses_of(slot)
        .iter()
        .filter(|c| selected.contains(&c.id))
        .map(|c| c.hours)
        .sum();

    if total_hours == required_hours {
        messages.push(ValidationMessage::success(format!(
            "Credit-hour requirement for {slot} met ({total_hours}/{required_hours})"
        )));
    } else {
        messages.push(ValidationMessage::error(format!(
            "Total credit hours for {slot} must be exactly {required_hours} ({total_hours} currently selected)"
        )));
        valid = false;
    }

    let summary = if valid {
        ValidationMessage::success(format!("All selection rules for {slot} are satisfied"))
    } else {
        ValidationMessage::error(format!("Some selection rules for {slot} are not satisfied"))
    };
    messages.insert(0, summary);

    SemesterReport {
        slot,
        valid,
        messages,
        total_hours,
    }
}

/// Validate the cross-semester rules: category exact-count, category
/// max-count, and course-name uniqueness across semester numbers
///
/// Every rule is always evaluated and reported, so partial progress stays
/// visible even while individual slots are still invalid.
#[must_use]
pub fn validate_global(
    catalog: &CatalogIndex,
    state: &SelectionState,
    policy: &EnrollmentPolicy,
) -> GlobalReport {
    let selected = state.all_selected();
    let mut messages = Vec::new();
    let mut valid = true;

    // Category exact-count
    let exact = &policy.exact_category;
    let exact_count = exact.ids.iter().filter(|id| selected.contains(*id)).count();
    if exact_count == exact.required_count {
        messages.push(ValidationMessage::success(format!(
            "{} requirement met (exactly {} selected)",
            exact.name, exact.required_count
        )));
    } else {
        messages.push(ValidationMessage::error(format!(
            "Select exactly {} course(s) from the {} category ({exact_count} currently selected)",
            exact.required_count, exact.name
        )));
        valid = false;
    }

    // Category max-count
    let max = &policy.max_category;
    let max_count = max.ids.iter().filter(|id| selected.contains(*id)).count();
    if max_count <= max.max_count {
        messages.push(ValidationMessage::success(format!(
            "{} limit respected ({max_count} of at most {} selected)",
            max.name, max.max_count
        )));
    } else {
        messages.push(ValidationMessage::error(format!(
            "Select at most {} course(s) from the {} category ({max_count} currently selected)",
            max.max_count, max.name
        )));
        valid = false;
    }

    // Name uniqueness across semester numbers. Occurrences are grouped by
    // course name; a name spanning both semester 1 and semester 2 slots is
    // a violation, regardless of year.
    let mut occurrences: BTreeMap<&str, Vec<Slot>> = BTreeMap::new();
    for id in &selected {
        if let Some(course) = catalog.by_id(id) {
            occurrences
                .entry(course.name.as_str())
                .or_default()
                .push(course.slot());
        }
    }

    let mut duplicates = Vec::new();
    for (name, slots) in &occurrences {
        let mut semesters: Vec<u8> = slots.iter().map(|s| s.semester).collect();
        semesters.sort_unstable();
        semesters.dedup();
        if semesters.len() > 1 {
            let mut sorted = slots.clone();
            sorted.sort_unstable();
            let offerings: Vec<String> = sorted.iter().map(ToString::to_string).collect();
            duplicates.push(format!(
                "\"{name}\" is selected in both semesters ({})",
                offerings.join(", ")
            ));
        }
    }

    if duplicates.is_empty() {
        messages.push(ValidationMessage::success(
            "No course name is selected in more than one semester".to_string(),
        ));
    } else {
        for text in duplicates {
            messages.push(ValidationMessage::error(format!(
                "A course name may only be chosen in one semester: {text}"
            )));
        }
        valid = false;
    }

    GlobalReport { valid, messages }
}

/// Validate every slot in the catalog plus the cross-semester rules
///
/// A slot missing from the policy's `hours_by_slot` table is reported as an
/// error for that slot (there is no requirement to meet, so the slot can
/// never validate) rather than a panic.
#[must_use]
pub fn validate_all(
    catalog: &CatalogIndex,
    state: &SelectionState,
    policy: &EnrollmentPolicy,
) -> ValidationOutcome {
    let mut semesters = Vec::new();
    let mut valid = true;

    for slot in catalog.slots() {
        let report = if let Some(required) = policy.required_hours(slot) {
            validate_semester(catalog, state, slot, required)
        } else {
            SemesterReport {
                slot,
                valid: false,
                messages: vec![ValidationMessage::error(format!(
                    "No required-hours policy is configured for {slot}"
                ))],
                total_hours: 0,
            }
        };
        if !report.valid {
            valid = false;
        }
        semesters.push(report);
    }

    let global = validate_global(catalog, state, policy);
    if !global.valid {
        valid = false;
    }

    ValidationOutcome {
        semesters,
        global,
        valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;
    use std::collections::BTreeMap;

    /// The "학교지정"+"선택A" scenario: one mandatory 4-hour course and a
    /// quota-1 group of two 5-hour courses, 9 required hours.
    fn scenario_catalog() -> CatalogIndex {
        let y2s1 = Slot::new(2, 1);
        CatalogIndex::from_records(vec![
            Course::new_mandatory("c1".to_string(), y2s1, "문학".to_string(), 4),
            Course::new(
                "c2".to_string(),
                y2s1,
                "미술 창작".to_string(),
                5,
                "선택A".to_string(),
            )
            .with_quota(1),
            Course::new(
                "c3".to_string(),
                y2s1,
                "음악 감상과 비평".to_string(),
                5,
                "선택A".to_string(),
            )
            .with_quota(1),
        ])
        .expect("build catalog")
    }

    fn scenario_policy() -> EnrollmentPolicy {
        EnrollmentPolicy {
            exact_category: crate::core::policy::ExactCategory {
                name: "미술·음악".to_string(),
                ids: vec!["c2".to_string(), "c3".to_string()],
                required_count: 1,
            },
            max_category: crate::core::policy::MaxCategory {
                name: "심화".to_string(),
                ids: vec!["c3".to_string()],
                max_count: 1,
            },
            hours_by_slot: BTreeMap::from([("Y2S1".to_string(), 9)]),
        }
    }

    #[test]
    fn test_mandatory_plus_one_elective_is_valid() {
        let catalog = scenario_catalog();
        let y2s1 = Slot::new(2, 1);
        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);
        state.toggle(&catalog, y2s1, "c2", true);

        let report = validate_semester(&catalog, &state, y2s1, 9);

        assert!(report.valid);
        assert_eq!(report.total_hours, 9);
        assert!(report.messages.iter().all(|m| !m.is_error()));
    }

    #[test]
    fn test_overfilled_group_is_invalid_even_before_hours() {
        let catalog = scenario_catalog();
        let y2s1 = Slot::new(2, 1);
        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);
        state.toggle(&catalog, y2s1, "c2", true);
        state.toggle(&catalog, y2s1, "c3", true);

        let report = validate_semester(&catalog, &state, y2s1, 9);

        assert!(!report.valid);
        assert_eq!(report.total_hours, 14);
        // both the group quota and the hour total fail
        let errors: Vec<&ValidationMessage> =
            report.messages.iter().filter(|m| m.is_error()).collect();
        assert!(errors.iter().any(|m| m.text.contains("선택A")));
        assert!(errors.iter().any(|m| m.text.contains("9")));
    }

    #[test]
    fn test_underfilled_group_is_invalid() {
        let catalog = scenario_catalog();
        let y2s1 = Slot::new(2, 1);
        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);

        let report = validate_semester(&catalog, &state, y2s1, 9);

        assert!(!report.valid);
        assert_eq!(report.total_hours, 4);
    }

    #[test]
    fn test_hours_are_exact_match() {
        let y2s1 = Slot::new(2, 1);
        let catalog = CatalogIndex::from_records(vec![
            Course::new_mandatory("c1".to_string(), y2s1, "문학".to_string(), 4),
            Course::new(
                "c2".to_string(),
                y2s1,
                "여행지리".to_string(),
                5,
                "선택A".to_string(),
            ),
        ])
        .expect("build catalog");
        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);
        state.toggle(&catalog, y2s1, "c2", true);

        // 9 selected: required-1 and required+1 both fail, exact passes
        assert!(!validate_semester(&catalog, &state, y2s1, 8).valid);
        assert!(!validate_semester(&catalog, &state, y2s1, 10).valid);
        assert!(validate_semester(&catalog, &state, y2s1, 9).valid);
    }

    #[test]
    fn test_exact_category_rule() {
        let catalog = scenario_catalog();
        let y2s1 = Slot::new(2, 1);
        let policy = scenario_policy();

        // zero arts picks: required_count is 1
        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);
        let report = validate_global(&catalog, &state, &policy);
        assert!(!report.valid);

        // exactly one arts pick
        state.toggle(&catalog, y2s1, "c2", true);
        let report = validate_global(&catalog, &state, &policy);
        assert!(report.valid);

        // two arts picks: exact-match fails again
        state.toggle(&catalog, y2s1, "c3", true);
        let report = validate_global(&catalog, &state, &policy);
        assert!(!report.valid);
    }

    #[test]
    fn test_max_category_rule() {
        let y2s1 = Slot::new(2, 1);
        let catalog = CatalogIndex::from_records(vec![
            Course::new(
                "k1".to_string(),
                y2s1,
                "심화 국어".to_string(),
                5,
                "선택B".to_string(),
            )
            .with_quota(2),
            Course::new(
                "k2".to_string(),
                y2s1,
                "심화 수학".to_string(),
                5,
                "선택B".to_string(),
            )
            .with_quota(2),
        ])
        .expect("build catalog");
        let policy = EnrollmentPolicy {
            exact_category: crate::core::policy::ExactCategory {
                name: "미술·음악".to_string(),
                ids: vec![],
                required_count: 0,
            },
            max_category: crate::core::policy::MaxCategory {
                name: "국영수 심화".to_string(),
                ids: vec!["k1".to_string(), "k2".to_string()],
                max_count: 1,
            },
            hours_by_slot: BTreeMap::new(),
        };

        let mut state = SelectionState::new();
        state.toggle(&catalog, y2s1, "k1", true);

        // exactly the max is valid
        assert!(validate_global(&catalog, &state, &policy).valid);

        // max+1 is invalid
        state.toggle(&catalog, y2s1, "k2", true);
        let report = validate_global(&catalog, &state, &policy);
        assert!(!report.valid);
        assert!(report
            .messages
            .iter()
            .any(|m| m.is_error() && m.text.contains("국영수 심화")));
    }

    #[test]
    fn test_name_uniqueness_across_semester_numbers() {
        let policy = EnrollmentPolicy {
            exact_category: crate::core::policy::ExactCategory {
                name: "미술·음악".to_string(),
                ids: vec![],
                required_count: 0,
            },
            max_category: crate::core::policy::MaxCategory {
                name: "국영수 심화".to_string(),
                ids: vec![],
                max_count: 0,
            },
            hours_by_slot: BTreeMap::new(),
        };

        // "문학" offered in (2,1) and (3,2): semester numbers differ
        let catalog = CatalogIndex::from_records(vec![
            Course::new(
                "a".to_string(),
                Slot::new(2, 1),
                "문학".to_string(),
                5,
                "선택A".to_string(),
            ),
            Course::new(
                "b".to_string(),
                Slot::new(3, 2),
                "문학".to_string(),
                5,
                "선택A".to_string(),
            ),
        ])
        .expect("build catalog");
        let mut state = SelectionState::new();
        state.toggle(&catalog, Slot::new(2, 1), "a", true);
        state.toggle(&catalog, Slot::new(3, 2), "b", true);

        let report = validate_global(&catalog, &state, &policy);
        assert!(!report.valid);
        let dup = report
            .messages
            .iter()
            .find(|m| m.is_error())
            .expect("duplicate-name error");
        assert!(dup.text.contains("문학"));
        assert!(dup.text.contains("year 2 semester 1"));
        assert!(dup.text.contains("year 3 semester 2"));
    }

    #[test]
    fn test_same_name_same_semester_number_is_allowed() {
        let policy = EnrollmentPolicy {
            exact_category: crate::core::policy::ExactCategory {
                name: "미술·음악".to_string(),
                ids: vec![],
                required_count: 0,
            },
            max_category: crate::core::policy::MaxCategory {
                name: "국영수 심화".to_string(),
                ids: vec![],
                max_count: 0,
            },
            hours_by_slot: BTreeMap::new(),
        };

        // "문학" in (2,1) and (3,1): same semester number, different years
        let catalog = CatalogIndex::from_records(vec![
            Course::new(
                "a".to_string(),
                Slot::new(2, 1),
                "문학".to_string(),
                5,
                "선택A".to_string(),
            ),
            Course::new(
                "b".to_string(),
                Slot::new(3, 1),
                "문학".to_string(),
                5,
                "선택A".to_string(),
            ),
        ])
        .expect("build catalog");
        let mut state = SelectionState::new();
        state.toggle(&catalog, Slot::new(2, 1), "a", true);
        state.toggle(&catalog, Slot::new(3, 1), "b", true);

        assert!(validate_global(&catalog, &state, &policy).valid);
    }

    #[test]
    fn test_validate_all_combines_slots_and_global() {
        let catalog = scenario_catalog();
        let y2s1 = Slot::new(2, 1);
        let policy = scenario_policy();

        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);
        state.toggle(&catalog, y2s1, "c2", true);

        let outcome = validate_all(&catalog, &state, &policy);
        assert!(outcome.valid);
        assert_eq!(outcome.semesters.len(), 1);
        assert!(outcome.global.valid);

        // break one semester rule and the overall outcome follows
        state.toggle(&catalog, y2s1, "c2", false);
        let outcome = validate_all(&catalog, &state, &policy);
        assert!(!outcome.valid);
        assert!(!outcome.semesters[0].valid);
    }

    #[test]
    fn test_missing_hours_policy_is_reported_not_panicked() {
        let catalog = scenario_catalog();
        let policy = EnrollmentPolicy {
            hours_by_slot: BTreeMap::new(),
            ..scenario_policy()
        };

        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);

        let outcome = validate_all(&catalog, &state, &policy);
        assert!(!outcome.valid);
        assert!(outcome.semesters[0]
            .messages
            .iter()
            .any(|m| m.is_error() && m.text.contains("No required-hours policy")));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let catalog = scenario_catalog();
        let y2s1 = Slot::new(2, 1);
        let policy = scenario_policy();
        let mut state = SelectionState::new();
        state.seed_mandatory(&catalog);
        state.toggle(&catalog, y2s1, "c2", true);

        let first = validate_all(&catalog, &state, &policy);
        let second = validate_all(&catalog, &state, &policy);
        assert_eq!(first, second);
    }
}
