//! Course module model

use std::fmt;

use crate::core::error::DomainError;

use super::exam::{Exam, ExamStatus};

/// Maximum number of exam attempts a module may accumulate through
/// [`CourseModule::add_exam`].
pub const MAX_ATTEMPTS: usize = 3;

/// Derived state of a course module.
///
/// Never stored anywhere: always recomputed from the current attempt
/// sequence, so it cannot go stale when a nested grade changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    /// At least one attempt passed
    Passed,
    /// All attempts used, none passed; the module can no longer be passed
    NoMoreAttempts,
    /// Every attempt so far was graded and failed
    Failed,
    /// Attempts exist but none passed and at least one is still open
    InProgress,
    /// No attempts yet
    Planned,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Passed => "PASSED",
            Self::NoMoreAttempts => "NO_MORE_ATTEMPTS",
            Self::Failed => "FAILED",
            Self::InProgress => "IN_PROGRESS",
            Self::Planned => "PLANNED",
        };
        write!(f, "{name}")
    }
}

/// A course module with its exam attempts.
///
/// The attempt list is append-only from the outside; mutation of the list
/// shape goes through [`CourseModule::add_exam`], which enforces the attempt
/// ceiling. Everything derived from the attempts (status, best grade,
/// remaining attempts) is a pure read.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseModule {
    name: String,
    credits: u32,
    planned_semester: u32,
    exams: Vec<Exam>,
}

impl CourseModule {
    /// Create a new module with no attempts.
    ///
    /// # Arguments
    /// * `name` - Module name
    /// * `credits` - ECTS credit value
    /// * `planned_semester` - Semester (1-indexed) the module is planned for
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if the name is blank or either
    /// numeric argument is zero.
    pub fn new(name: String, credits: u32, planned_semester: u32) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("module name must not be empty"));
        }
        if credits == 0 {
            return Err(DomainError::validation("module credits must be positive"));
        }
        if planned_semester == 0 {
            return Err(DomainError::validation("planned semester must be positive"));
        }

        Ok(Self {
            name,
            credits,
            planned_semester,
            exams: Vec::new(),
        })
    }

    /// Append a new exam attempt.
    ///
    /// # Errors
    /// Returns [`DomainError::AttemptsExhausted`] if the module's status is
    /// already [`ModuleStatus::NoMoreAttempts`]. A passed module may still
    /// take further attempts (a grade-improvement try does not reopen it).
    pub fn add_exam(&mut self, exam: Exam) -> Result<(), DomainError> {
        if self.status() == ModuleStatus::NoMoreAttempts {
            return Err(DomainError::AttemptsExhausted(self.name.clone()));
        }
        self.exams.push(exam);
        Ok(())
    }

    /// Append an attempt without the ceiling check.
    ///
    /// Used when rebuilding a module from a persisted document: a well-formed
    /// document may hold exactly [`MAX_ATTEMPTS`] failed attempts, which
    /// [`CourseModule::add_exam`] would reject.
    pub(crate) fn restore_exam(&mut self, exam: Exam) {
        self.exams.push(exam);
    }

    /// Current status, derived from the attempt sequence.
    ///
    /// Evaluation order (first match wins): any attempt passed, attempt
    /// ceiling reached without a pass, all attempts failed, attempts pending,
    /// no attempts.
    #[must_use]
    pub fn status(&self) -> ModuleStatus {
        if self
            .exams
            .iter()
            .any(|exam| exam.status() == ExamStatus::Passed)
        {
            return ModuleStatus::Passed;
        }
        if self.exams.len() >= MAX_ATTEMPTS {
            return ModuleStatus::NoMoreAttempts;
        }
        if self.exams.is_empty() {
            return ModuleStatus::Planned;
        }
        if self
            .exams
            .iter()
            .all(|exam| exam.status() == ExamStatus::Failed)
        {
            ModuleStatus::Failed
        } else {
            ModuleStatus::InProgress
        }
    }

    /// Whether the module counts as passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status() == ModuleStatus::Passed
    }

    /// Attempts still available under the ceiling.
    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.exams.len())
    }

    /// Best (numerically lowest) grade among passed attempts.
    ///
    /// # Returns
    /// `None` if no attempt has passed.
    #[must_use]
    pub fn best_grade(&self) -> Option<f64> {
        self.exams
            .iter()
            .filter(|exam| exam.status() == ExamStatus::Passed)
            .filter_map(Exam::grade)
            .min_by(f64::total_cmp)
    }

    /// Module name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ECTS credit value
    #[must_use]
    pub const fn credits(&self) -> u32 {
        self.credits
    }

    /// Semester (1-indexed) the module is planned for
    #[must_use]
    pub const fn planned_semester(&self) -> u32 {
        self.planned_semester
    }

    /// All exam attempts in insertion order
    #[must_use]
    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// Mutable access to the attempts for result recording.
    ///
    /// A slice keeps the list shape fixed; appending still has to go through
    /// [`CourseModule::add_exam`].
    pub fn exams_mut(&mut self) -> &mut [Exam] {
        &mut self.exams
    }
}
