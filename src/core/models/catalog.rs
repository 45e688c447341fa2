//! Catalog index: loads and indexes the offered-course catalog

use super::course::{Course, Slot, MANDATORY_GROUP};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error raised when the course catalog cannot be loaded.
///
/// Fatal to engine construction: no partial catalog is ever produced.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog file could not be read
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The catalog source is not a well-formed list of course records
    #[error("Catalog is not a well-formed course list: {0}")]
    Parse(#[from] serde_json::Error),

    /// A course record is missing its identifier
    #[error("Catalog record {index} has an empty course id")]
    EmptyId {
        /// Zero-based record position
        index: usize,
    },

    /// Two course records share the same identifier
    #[error("Duplicate course id '{0}' in catalog")]
    DuplicateId(String),

    /// A course record has zero credit hours
    #[error("Course '{id}' has zero credit hours")]
    ZeroHours {
        /// Offending course id
        id: String,
    },

    /// A course record has a semester outside 1..=2
    #[error("Course '{id}' has invalid semester {semester} (expected 1 or 2)")]
    InvalidSemester {
        /// Offending course id
        id: String,
        /// Semester value found
        semester: u8,
    },

    /// Courses in one group of a slot declare different quotas
    #[error(
        "Group '{group}' in {slot} has conflicting quotas ({first} vs {second})"
    )]
    QuotaConflict {
        /// Group name with the conflict
        group: String,
        /// Slot the group belongs to
        slot: Slot,
        /// Quota seen first
        first: u32,
        /// Conflicting quota
        second: u32,
    },
}

/// One elective or mandatory bucket within a slot, as presented for
/// validation and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseGroup<'a> {
    /// Group name
    pub name: &'a str,
    /// Courses belonging to the group, in catalog order
    pub courses: Vec<&'a Course>,
    /// Exact number of picks required (0 for the mandatory group)
    pub quota: u32,
    /// Whether this is the reserved mandatory group
    pub is_mandatory: bool,
}

/// Read-only index over the offered-course catalog
///
/// Owns the `Course` records; everything downstream references courses by
/// id through this index.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    /// Courses in catalog order
    courses: Vec<Course>,
    /// Course position by id
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Load a catalog from a JSON file containing an array of course records
    ///
    /// # Arguments
    /// * `path` - Path to the catalog JSON file
    ///
    /// # Errors
    /// Returns `CatalogLoadError` if the file cannot be read, is not a
    /// well-formed course list, or violates a catalog invariant.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let records: Vec<Course> = serde_json::from_str(&content)?;
        Self::from_records(records)
    }

    /// Build an index from already-parsed course records
    ///
    /// Validates the catalog invariants: non-empty unique ids, positive
    /// credit hours, semesters in 1..=2, and a single quota per group
    /// within each slot.
    ///
    /// # Errors
    /// Returns `CatalogLoadError` on the first violated invariant.
    pub fn from_records(records: Vec<Course>) -> Result<Self, CatalogLoadError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut group_quotas: HashMap<(Slot, String), u32> = HashMap::new();

        for (index, course) in records.iter().enumerate() {
            if course.id.is_empty() {
                return Err(CatalogLoadError::EmptyId { index });
            }
            if by_id.insert(course.id.clone(), index).is_some() {
                return Err(CatalogLoadError::DuplicateId(course.id.clone()));
            }
            if course.hours == 0 {
                return Err(CatalogLoadError::ZeroHours {
                    id: course.id.clone(),
                });
            }
            if !(1..=2).contains(&course.semester) {
                return Err(CatalogLoadError::InvalidSemester {
                    id: course.id.clone(),
                    semester: course.semester,
                });
            }

            if !course.mandatory {
                let quota = effective_quota(course);
                let key = (course.slot(), course.group.clone());
                if let Some(&existing) = group_quotas.get(&key) {
                    if existing != quota {
                        return Err(CatalogLoadError::QuotaConflict {
                            group: course.group.clone(),
                            slot: course.slot(),
                            first: existing,
                            second: quota,
                        });
                    }
                } else {
                    group_quotas.insert(key, quota);
                }
            }
        }

        Ok(Self {
            courses: records,
            by_id,
        })
    }

    /// Get all courses offered in a slot, in catalog order
    #[must_use]
    pub fn courses_of(&self, slot: Slot) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.slot() == slot).collect()
    }

    /// Look up a course by its id
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Course> {
        self.by_id.get(id).map(|&idx| &self.courses[idx])
    }

    /// Partition a slot's courses into groups for validation and display
    ///
    /// The mandatory group (reserved name, quota 0) comes first; remaining
    /// groups follow in lexical name order. Courses within each group keep
    /// catalog order.
    #[must_use]
    pub fn groups_of(&self, slot: Slot) -> Vec<CourseGroup<'_>> {
        let mut groups: Vec<CourseGroup<'_>> = Vec::new();

        for course in self.courses_of(slot) {
            if let Some(group) = groups.iter_mut().find(|g| g.name == course.group) {
                group.courses.push(course);
            } else {
                let is_mandatory = course.group == MANDATORY_GROUP;
                groups.push(CourseGroup {
                    name: &course.group,
                    courses: vec![course],
                    quota: if is_mandatory {
                        0
                    } else {
                        effective_quota(course)
                    },
                    is_mandatory,
                });
            }
        }

        groups.sort_by(|a, b| {
            b.is_mandatory
                .cmp(&a.is_mandatory)
                .then_with(|| a.name.cmp(b.name))
        });
        groups
    }

    /// Get all distinct slots in the catalog, ascending by (year, semester)
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self.courses.iter().map(Course::slot).collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }

    /// Get all courses, in catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Quota for a non-mandatory course's group: unset or zero defaults to 1
const fn effective_quota(course: &Course) -> u32 {
    match course.group_quota {
        Some(q) if q > 0 => q,
        _ => 1,
    }
}
