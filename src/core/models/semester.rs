//! Semester model

use crate::core::error::DomainError;

use super::module::CourseModule;

/// One semester's slice of the study plan.
///
/// Owns its modules; each module derives its own state independently, the
/// semester only aggregates credit figures over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    number: u32,
    modules: Vec<CourseModule>,
}

impl Semester {
    /// Create an empty semester.
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if `number` is zero; semester
    /// numbers are 1-indexed.
    pub fn new(number: u32) -> Result<Self, DomainError> {
        if number == 0 {
            return Err(DomainError::validation("semester number must be positive"));
        }
        Ok(Self {
            number,
            modules: Vec::new(),
        })
    }

    /// Append a module.
    ///
    /// No duplicate check: two modules with the same name are two independent
    /// entries on purpose.
    pub fn add_module(&mut self, module: CourseModule) {
        self.modules.push(module);
    }

    /// Sum of all module credits in this semester.
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.modules.iter().map(CourseModule::credits).sum()
    }

    /// Sum of credits of the modules passed so far.
    #[must_use]
    pub fn achieved_credits(&self) -> u32 {
        self.modules
            .iter()
            .filter(|module| module.is_passed())
            .map(CourseModule::credits)
            .sum()
    }

    /// Achieved share of this semester's credits, in percent.
    ///
    /// 0 for a semester that carries no credits.
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        let total = self.total_credits();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.achieved_credits()) / f64::from(total) * 100.0
    }

    /// Semester number (1-indexed)
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Modules in insertion order
    #[must_use]
    pub fn modules(&self) -> &[CourseModule] {
        &self.modules
    }

    /// Mutable access to the modules for recording exam results.
    pub fn modules_mut(&mut self) -> &mut [CourseModule] {
        &mut self.modules
    }
}
