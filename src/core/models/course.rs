//! Course and registration-slot models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved group name for school-mandated courses.
///
/// Courses in this group are seeded into every selection and cannot be
/// deselected. The group carries no quota.
pub const MANDATORY_GROUP: &str = "학교지정";

/// A registration slot: one (year, semester) pair
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Slot {
    /// Grade level (e.g., 2 or 3; treated as an open set)
    pub year: u8,
    /// Semester number (1 or 2)
    pub semester: u8,
}

impl Slot {
    /// Create a new slot
    #[must_use]
    pub const fn new(year: u8, semester: u8) -> Self {
        Self { year, semester }
    }

    /// Get the slot key used in policy tables (e.g., "Y2S1")
    #[must_use]
    pub fn key(&self) -> String {
        format!("Y{}S{}", self.year, self.semester)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year {} semester {}", self.year, self.semester)
    }
}

impl FromStr for Slot {
    type Err = String;

    /// Parse a slot key in the "Y<year>S<semester>" form (e.g., "Y2S1")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('Y')
            .ok_or_else(|| format!("Invalid slot key: '{s}'"))?;
        let (year_str, semester_str) = rest
            .split_once('S')
            .ok_or_else(|| format!("Invalid slot key: '{s}'"))?;

        let year = year_str
            .parse::<u8>()
            .map_err(|_| format!("Invalid year in slot key: '{s}'"))?;
        let semester = semester_str
            .parse::<u8>()
            .map_err(|_| format!("Invalid semester in slot key: '{s}'"))?;

        Ok(Self::new(year, semester))
    }
}

/// Represents an offered course in the catalog
///
/// Records are immutable after catalog load; selections reference courses
/// by `id` and never copy or mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier (e.g., "c19")
    pub id: String,

    /// Grade level offering the course
    pub year: u8,

    /// Semester number (1 or 2)
    pub semester: u8,

    /// Display name (e.g., "문학"); not unique across slots
    pub name: String,

    /// Credit hours (positive integer)
    pub hours: u32,

    /// Elective or mandatory bucket name within the slot
    pub group: String,

    /// Whether the course is school-mandated (seeded, never removable)
    #[serde(default)]
    pub mandatory: bool,

    /// Exact number of picks required from the course's group.
    /// Ignored for mandatory courses; unset or zero defaults to 1.
    #[serde(default)]
    pub group_quota: Option<u32>,
}

impl Course {
    /// Create a new elective course
    ///
    /// # Arguments
    /// * `id` - Unique course identifier
    /// * `slot` - Registration slot offering the course
    /// * `name` - Display name
    /// * `hours` - Credit hours
    /// * `group` - Elective group name
    #[must_use]
    pub const fn new(id: String, slot: Slot, name: String, hours: u32, group: String) -> Self {
        Self {
            id,
            year: slot.year,
            semester: slot.semester,
            name,
            hours,
            group,
            mandatory: false,
            group_quota: None,
        }
    }

    /// Create a new school-mandated course in the reserved mandatory group
    #[must_use]
    pub fn new_mandatory(id: String, slot: Slot, name: String, hours: u32) -> Self {
        Self {
            id,
            year: slot.year,
            semester: slot.semester,
            name,
            hours,
            group: MANDATORY_GROUP.to_string(),
            mandatory: true,
            group_quota: None,
        }
    }

    /// Get the slot this course is offered in
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot::new(self.year, self.semester)
    }

    /// Set the group quota (builder-style, for catalog construction)
    #[must_use]
    pub fn with_quota(mut self, quota: u32) -> Self {
        self.group_quota = Some(quota);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_key_roundtrip() {
        let slot = Slot::new(2, 1);
        assert_eq!(slot.key(), "Y2S1");
        assert_eq!("Y2S1".parse::<Slot>().unwrap(), slot);
        assert_eq!("Y3S2".parse::<Slot>().unwrap(), Slot::new(3, 2));
    }

    #[test]
    fn test_slot_key_rejects_malformed() {
        assert!("2S1".parse::<Slot>().is_err());
        assert!("Y2".parse::<Slot>().is_err());
        assert!("YxS1".parse::<Slot>().is_err());
        assert!("Y2Sx".parse::<Slot>().is_err());
    }

    #[test]
    fn test_slot_ordering() {
        let mut slots = vec![Slot::new(3, 1), Slot::new(2, 2), Slot::new(2, 1)];
        slots.sort();
        assert_eq!(
            slots,
            vec![Slot::new(2, 1), Slot::new(2, 2), Slot::new(3, 1)]
        );
    }

    #[test]
    fn test_course_creation() {
        let course = Course::new(
            "c8".to_string(),
            Slot::new(2, 1),
            "일본어Ⅰ".to_string(),
            5,
            "선택A".to_string(),
        );

        assert_eq!(course.id, "c8");
        assert_eq!(course.slot(), Slot::new(2, 1));
        assert_eq!(course.hours, 5);
        assert!(!course.mandatory);
        assert!(course.group_quota.is_none());
    }

    #[test]
    fn test_mandatory_course_uses_reserved_group() {
        let course =
            Course::new_mandatory("c1".to_string(), Slot::new(2, 1), "문학".to_string(), 4);

        assert!(course.mandatory);
        assert_eq!(course.group, MANDATORY_GROUP);
    }

    #[test]
    fn test_course_json_shape() {
        let json = r#"{
            "id": "c19",
            "year": 2,
            "semester": 2,
            "name": "음악 창작",
            "hours": 5,
            "group": "선택A",
            "mandatory": false,
            "groupQuota": 1
        }"#;

        let course: Course = serde_json::from_str(json).expect("parse course record");
        assert_eq!(course.id, "c19");
        assert_eq!(course.group_quota, Some(1));
    }

    #[test]
    fn test_course_json_defaults() {
        // mandatory and groupQuota are optional in catalog records
        let json = r#"{
            "id": "c1",
            "year": 2,
            "semester": 1,
            "name": "문학",
            "hours": 4,
            "group": "학교지정"
        }"#;

        let course: Course = serde_json::from_str(json).expect("parse course record");
        assert!(!course.mandatory);
        assert!(course.group_quota.is_none());
    }
}
