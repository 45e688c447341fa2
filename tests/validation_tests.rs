//! Integration tests for the validation engine over the sample catalog

use enroll_check::core::models::{CatalogIndex, SelectionRequest, SelectionState, Slot};
use enroll_check::core::policy::EnrollmentPolicy;
use enroll_check::core::validate::{validate_all, validate_global, validate_semester};

fn load_fixtures() -> (CatalogIndex, EnrollmentPolicy) {
    let catalog = CatalogIndex::load("samples/catalog.json").expect("load sample catalog");
    let policy = EnrollmentPolicy::load("samples/policy.toml").expect("load sample policy");
    (catalog, policy)
}

fn valid_request() -> SelectionRequest {
    let content =
        std::fs::read_to_string("samples/selections.json").expect("read sample selections");
    serde_json::from_str(&content).expect("parse sample selections")
}

#[test]
fn test_sample_catalog_loads() {
    let (catalog, _) = load_fixtures();

    assert_eq!(catalog.len(), 48);
    assert_eq!(
        catalog.slots(),
        vec![
            Slot::new(2, 1),
            Slot::new(2, 2),
            Slot::new(3, 1),
            Slot::new(3, 2)
        ]
    );

    let course = catalog.by_id("c6").expect("c6 exists");
    assert_eq!(course.name, "미술 창작");
    assert_eq!(course.hours, 5);
    assert!(!course.mandatory);

    // each slot: mandatory group plus two elective groups
    let groups = catalog.groups_of(Slot::new(2, 1));
    assert_eq!(groups.len(), 3);
    assert!(groups[0].is_mandatory);
    assert_eq!(groups[0].courses.len(), 5);
    assert_eq!(groups[1].name, "선택A");
    assert_eq!(groups[2].name, "선택B");
}

#[test]
fn test_seeding_selects_every_mandatory_course() {
    let (catalog, _) = load_fixtures();
    let mut state = SelectionState::new();
    state.seed_mandatory(&catalog);

    // 5 mandatory courses in each of 4 slots
    assert_eq!(state.len(), 20);
    for course in catalog.courses() {
        if course.mandatory {
            assert!(state.is_selected(&course.id), "{} must be seeded", course.id);
        }
    }

    // seeded ids cannot be toggled off
    assert!(!state.toggle(&catalog, Slot::new(2, 1), "c1", false));
    assert!(state.is_selected("c1"));
}

#[test]
fn test_sample_selection_is_fully_valid() {
    let (catalog, policy) = load_fixtures();
    let mut state = SelectionState::new();
    valid_request().apply(&catalog, &mut state);

    let outcome = validate_all(&catalog, &state, &policy);

    assert!(outcome.valid, "sample selection should satisfy every rule");
    assert_eq!(outcome.semesters.len(), 4);
    for report in &outcome.semesters {
        assert!(report.valid, "slot {} should be valid", report.slot);
        assert_eq!(report.total_hours, 29);
    }
    assert!(outcome.global.valid);
}

#[test]
fn test_group_quota_is_exact_match() {
    let (catalog, _) = load_fixtures();
    let y2s1 = Slot::new(2, 1);
    let mut state = SelectionState::new();
    valid_request().apply(&catalog, &mut state);

    // quota+1 in 선택A
    state.toggle(&catalog, y2s1, "c8", true);
    let report = validate_semester(&catalog, &state, y2s1, 29);
    assert!(!report.valid);

    // back to quota, then quota-1
    state.toggle(&catalog, y2s1, "c8", false);
    state.toggle(&catalog, y2s1, "c6", false);
    let report = validate_semester(&catalog, &state, y2s1, 29);
    assert!(!report.valid);
}

#[test]
fn test_hours_must_match_exactly() {
    let (catalog, _) = load_fixtures();
    let y2s1 = Slot::new(2, 1);
    let mut state = SelectionState::new();
    valid_request().apply(&catalog, &mut state);

    let report = validate_semester(&catalog, &state, y2s1, 29);
    assert!(report.valid);
    assert_eq!(report.total_hours, 29);

    assert!(!validate_semester(&catalog, &state, y2s1, 28).valid);
    assert!(!validate_semester(&catalog, &state, y2s1, 30).valid);
}

#[test]
fn test_arts_category_requires_exactly_two() {
    let (catalog, policy) = load_fixtures();
    let mut state = SelectionState::new();
    valid_request().apply(&catalog, &mut state);

    // baseline: two arts picks (c6, c30)
    assert!(validate_global(&catalog, &state, &policy).valid);

    // one arts pick: swap c30 for 일본어Ⅰ in the same slot
    state.toggle(&catalog, Slot::new(3, 1), "c30", false);
    state.toggle(&catalog, Slot::new(3, 1), "c32", true);
    let report = validate_global(&catalog, &state, &policy);
    assert!(!report.valid);
    assert!(report
        .messages
        .iter()
        .any(|m| m.is_error() && m.text.contains("미술/음악")));

    // three arts picks: restore c30 and swap Y3S2's 중국어Ⅰ for 음악 창작
    state.toggle(&catalog, Slot::new(3, 1), "c32", false);
    state.toggle(&catalog, Slot::new(3, 1), "c30", true);
    state.toggle(&catalog, Slot::new(3, 2), "c45", false);
    state.toggle(&catalog, Slot::new(3, 2), "c43", true);
    assert!(!validate_global(&catalog, &state, &policy).valid);
}

#[test]
fn test_kes_category_caps_at_three() {
    let (catalog, policy) = load_fixtures();
    let mut state = SelectionState::new();
    state.seed_mandatory(&catalog);

    // three KES picks respect the cap
    state.toggle(&catalog, Slot::new(2, 1), "c10", true);
    state.toggle(&catalog, Slot::new(2, 2), "c22", true);
    state.toggle(&catalog, Slot::new(3, 1), "c34", true);
    let report = validate_global(&catalog, &state, &policy);
    assert!(report
        .messages
        .iter()
        .any(|m| !m.is_error() && m.text.contains("국영수")));

    // a fourth violates it regardless of per-slot validity
    state.toggle(&catalog, Slot::new(3, 2), "c46", true);
    let report = validate_global(&catalog, &state, &policy);
    assert!(!report.valid);
    assert!(report
        .messages
        .iter()
        .any(|m| m.is_error() && m.text.contains("국영수")));
}

#[test]
fn test_same_name_across_semester_numbers_is_rejected() {
    let (catalog, policy) = load_fixtures();
    let mut state = SelectionState::new();
    state.seed_mandatory(&catalog);

    // 일본어Ⅰ in (2,1) and (2,2): semester numbers 1 and 2
    state.toggle(&catalog, Slot::new(2, 1), "c8", true);
    state.toggle(&catalog, Slot::new(2, 2), "c20", true);

    let report = validate_global(&catalog, &state, &policy);
    assert!(!report.valid);
    let dup = report
        .messages
        .iter()
        .find(|m| m.is_error() && m.text.contains("일본어Ⅰ"))
        .expect("duplicate-name violation for 일본어Ⅰ");
    assert!(dup.text.contains("year 2 semester 1"));
    assert!(dup.text.contains("year 2 semester 2"));
}

#[test]
fn test_same_name_same_semester_number_across_years_is_allowed() {
    let (catalog, policy) = load_fixtures();
    let mut state = SelectionState::new();
    state.seed_mandatory(&catalog);

    // 미술 창작 in (2,1) and (3,1): both semester 1
    state.toggle(&catalog, Slot::new(2, 1), "c6", true);
    state.toggle(&catalog, Slot::new(3, 1), "c30", true);

    let report = validate_global(&catalog, &state, &policy);
    assert!(!report
        .messages
        .iter()
        .any(|m| m.is_error() && m.text.contains("미술 창작")));
}

#[test]
fn test_validation_is_pure_and_repeatable() {
    let (catalog, policy) = load_fixtures();
    let mut state = SelectionState::new();
    valid_request().apply(&catalog, &mut state);

    let first = validate_all(&catalog, &state, &policy);
    let second = validate_all(&catalog, &state, &policy);

    assert_eq!(first, second);
}

#[test]
fn test_default_policy_reports_missing_slots_for_mismatched_catalog() {
    // The compiled-in default policy targets the original catalog ids, but
    // its hour table covers the same four slots, so it still validates the
    // sample catalog's structure without panicking.
    let (catalog, _) = load_fixtures();
    let policy = EnrollmentPolicy::from_defaults();
    let mut state = SelectionState::new();
    state.seed_mandatory(&catalog);

    let outcome = validate_all(&catalog, &state, &policy);
    assert_eq!(outcome.semesters.len(), 4);
    assert!(!outcome.valid);
}
