//! Data models for `EnrollCheck`

pub mod catalog;
pub mod course;
pub mod selection;

pub use catalog::{CatalogIndex, CatalogLoadError, CourseGroup};
pub use course::{Course, Slot, MANDATORY_GROUP};
pub use selection::{SelectionRequest, SelectionState};
