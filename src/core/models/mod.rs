//! Data models for `studytrack`

pub mod exam;
pub mod module;
pub mod program;
pub mod semester;

pub use exam::{Exam, ExamKind, ExamStatus};
pub use module::{CourseModule, ModuleStatus, MAX_ATTEMPTS};
pub use program::DegreeProgram;
pub use semester::Semester;
