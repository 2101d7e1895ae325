//! Degree program model

use crate::core::error::DomainError;

use super::exam::{BEST_GRADE, WORST_GRADE};
use super::module::{CourseModule, ModuleStatus};
use super::semester::Semester;

/// Root of the study-plan graph: a degree program owning its semesters.
///
/// The program holds no status of its own; every program-level figure
/// (current semester, average grade, completability) is derived on read from
/// the module leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeProgram {
    name: String,
    target_semesters: u32,
    target_grade: f64,
    semesters: Vec<Semester>,
}

impl DegreeProgram {
    /// Create a program with no semesters.
    ///
    /// # Arguments
    /// * `name` - Program name
    /// * `target_semesters` - Planned length of the program in semesters
    /// * `target_grade` - Desired final average on the 1.0 to 5.0 scale
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if the name is blank,
    /// `target_semesters` is zero, or `target_grade` falls outside the grade
    /// scale.
    pub fn new(name: String, target_semesters: u32, target_grade: f64) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("program name must not be empty"));
        }
        if target_semesters == 0 {
            return Err(DomainError::validation(
                "target semester count must be positive",
            ));
        }
        if !(BEST_GRADE..=WORST_GRADE).contains(&target_grade) {
            return Err(DomainError::validation(
                "target grade must be between 1.0 and 5.0",
            ));
        }

        Ok(Self {
            name,
            target_semesters,
            target_grade,
            semesters: Vec::new(),
        })
    }

    /// Append a semester.
    ///
    /// Appends as-is; callers that create semesters out of order re-sort via
    /// [`DegreeProgram::sort_semesters`] to keep the sequence readable.
    pub fn add_semester(&mut self, semester: Semester) {
        self.semesters.push(semester);
    }

    /// Sort the semesters by their number (stable).
    pub fn sort_semesters(&mut self) {
        self.semesters.sort_by_key(Semester::number);
    }

    /// Find a semester by its number.
    #[must_use]
    pub fn semester_mut(&mut self, number: u32) -> Option<&mut Semester> {
        self.semesters
            .iter_mut()
            .find(|semester| semester.number() == number)
    }

    /// All modules across all semesters.
    ///
    /// Semester order is preserved, module order within a semester is
    /// preserved.
    pub fn all_modules(&self) -> impl Iterator<Item = &CourseModule> {
        self.semesters.iter().flat_map(Semester::modules)
    }

    /// The semester the student is effectively in.
    ///
    /// 1 for a program without modules; otherwise the earliest planned
    /// semester among the modules not yet passed; the target semester count
    /// once everything is passed.
    #[must_use]
    pub fn current_semester(&self) -> u32 {
        if self.all_modules().next().is_none() {
            return 1;
        }
        self.all_modules()
            .filter(|module| !module.is_passed())
            .map(CourseModule::planned_semester)
            .min()
            .unwrap_or(self.target_semesters)
    }

    /// Credit-weighted average over the best grades of all passed modules,
    /// rounded to two decimal places.
    ///
    /// # Returns
    /// `None` while no module is passed.
    #[must_use]
    pub fn average_grade(&self) -> Option<f64> {
        let mut weighted_sum = 0.0;
        let mut credit_sum: u32 = 0;
        for module in self.all_modules() {
            if let Some(best) = module.best_grade() {
                weighted_sum += best * f64::from(module.credits());
                credit_sum += module.credits();
            }
        }

        if credit_sum == 0 {
            return None;
        }
        let average = weighted_sum / f64::from(credit_sum);
        Some((average * 100.0).round() / 100.0)
    }

    /// Whether the degree can still be completed.
    ///
    /// False as soon as any module has run out of attempts.
    #[must_use]
    pub fn is_completable(&self) -> bool {
        !self
            .all_modules()
            .any(|module| module.status() == ModuleStatus::NoMoreAttempts)
    }

    /// The modules that make the degree impossible to complete.
    #[must_use]
    pub fn critical_failures(&self) -> Vec<&CourseModule> {
        self.all_modules()
            .filter(|module| module.status() == ModuleStatus::NoMoreAttempts)
            .collect()
    }

    /// Sum of all module credits in the program.
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.semesters.iter().map(Semester::total_credits).sum()
    }

    /// Sum of credits of all passed modules.
    #[must_use]
    pub fn achieved_credits(&self) -> u32 {
        self.semesters.iter().map(Semester::achieved_credits).sum()
    }

    /// Program name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Planned length of the program in semesters
    #[must_use]
    pub const fn target_semesters(&self) -> u32 {
        self.target_semesters
    }

    /// Desired final average grade
    #[must_use]
    pub const fn target_grade(&self) -> f64 {
        self.target_grade
    }

    /// Semesters in their current order
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Mutable access to the semesters for recording exam results.
    pub fn semesters_mut(&mut self) -> &mut [Semester] {
        &mut self.semesters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::exam::{Exam, ExamKind};
    use chrono::NaiveDate;

    fn program() -> DegreeProgram {
        DegreeProgram::new("Computer Science".to_string(), 6, 2.0).unwrap()
    }

    fn graded_module(name: &str, credits: u32, semester: u32, grade: f64) -> CourseModule {
        let mut module = CourseModule::new(name.to_string(), credits, semester).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut exam = Exam::new(ExamKind::Written, date);
        exam.record_result(grade).unwrap();
        module.add_exam(exam).unwrap();
        module
    }

    fn open_module(name: &str, credits: u32, semester: u32) -> CourseModule {
        CourseModule::new(name.to_string(), credits, semester).unwrap()
    }

    fn with_semester(program: &mut DegreeProgram, number: u32, modules: Vec<CourseModule>) {
        let mut semester = Semester::new(number).unwrap();
        for module in modules {
            semester.add_module(module);
        }
        program.add_semester(semester);
    }

    #[test]
    fn test_new_program() {
        let program = program();

        assert_eq!(program.name(), "Computer Science");
        assert_eq!(program.target_semesters(), 6);
        assert!((program.target_grade() - 2.0).abs() < f64::EPSILON);
        assert!(program.semesters().is_empty());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = DegreeProgram::new("  ".to_string(), 6, 2.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_zero_target_semesters_are_rejected() {
        let err = DegreeProgram::new("Computer Science".to_string(), 0, 2.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_target_grade_outside_scale_is_rejected() {
        assert!(DegreeProgram::new("Computer Science".to_string(), 6, 0.9).is_err());
        assert!(DegreeProgram::new("Computer Science".to_string(), 6, 5.1).is_err());
        assert!(DegreeProgram::new("Computer Science".to_string(), 6, 1.0).is_ok());
        assert!(DegreeProgram::new("Computer Science".to_string(), 6, 5.0).is_ok());
    }

    #[test]
    fn test_sort_semesters_orders_by_number() {
        let mut program = program();
        with_semester(&mut program, 3, vec![]);
        with_semester(&mut program, 1, vec![]);
        with_semester(&mut program, 2, vec![]);

        program.sort_semesters();

        let numbers: Vec<u32> = program.semesters().iter().map(Semester::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_all_modules_preserves_order() {
        let mut program = program();
        with_semester(
            &mut program,
            1,
            vec![open_module("A", 5, 1), open_module("B", 5, 1)],
        );
        with_semester(&mut program, 2, vec![open_module("C", 5, 2)]);

        let names: Vec<&str> = program.all_modules().map(CourseModule::name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_current_semester_defaults_to_one() {
        let mut program = program();
        assert_eq!(program.current_semester(), 1);

        with_semester(&mut program, 1, vec![]);
        assert_eq!(program.current_semester(), 1);
    }

    #[test]
    fn test_current_semester_is_earliest_open_semester() {
        let mut program = program();
        with_semester(&mut program, 1, vec![graded_module("A", 5, 1, 2.0)]);
        with_semester(&mut program, 2, vec![open_module("B", 5, 2)]);
        with_semester(&mut program, 3, vec![open_module("C", 5, 3)]);

        assert_eq!(program.current_semester(), 2);
    }

    #[test]
    fn test_current_semester_after_everything_passed() {
        let mut program = program();
        with_semester(&mut program, 1, vec![graded_module("A", 5, 1, 2.0)]);

        assert_eq!(program.current_semester(), program.target_semesters());
    }

    #[test]
    fn test_average_grade_is_credit_weighted() {
        let mut program = program();
        with_semester(
            &mut program,
            1,
            vec![
                graded_module("A", 10, 1, 2.0),
                graded_module("B", 5, 1, 4.0),
                open_module("C", 8, 1),
            ],
        );

        // (2.0 * 10 + 4.0 * 5) / 15 = 2.666..., rounded to two places
        assert!((program.average_grade().unwrap() - 2.67).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_grade_uses_best_attempt_per_module() {
        let mut program = program();
        let mut module = open_module("A", 10, 1);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut first = Exam::new(ExamKind::Written, date);
        first.record_result(3.7).unwrap();
        module.add_exam(first).unwrap();
        let mut second = Exam::new(ExamKind::Written, date);
        second.record_result(1.3).unwrap();
        module.add_exam(second).unwrap();
        with_semester(&mut program, 1, vec![module]);

        assert!((program.average_grade().unwrap() - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_grade_none_without_passed_module() {
        let mut program = program();
        with_semester(
            &mut program,
            1,
            vec![graded_module("A", 5, 1, 5.0), open_module("B", 5, 1)],
        );

        assert!(program.average_grade().is_none());
    }

    #[test]
    fn test_completable_without_exhausted_modules() {
        let mut program = program();
        with_semester(&mut program, 1, vec![graded_module("A", 5, 1, 5.0)]);

        assert!(program.is_completable());
        assert!(program.critical_failures().is_empty());
    }

    #[test]
    fn test_exhausted_module_blocks_completion() {
        let mut program = program();
        let mut failed = open_module("A", 5, 1);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for _ in 0..3 {
            let mut exam = Exam::new(ExamKind::Written, date);
            exam.record_result(5.0).unwrap();
            failed.add_exam(exam).unwrap();
        }
        with_semester(
            &mut program,
            1,
            vec![failed, graded_module("B", 5, 1, 1.3)],
        );

        assert!(!program.is_completable());
        let critical = program.critical_failures();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].name(), "A");
    }

    #[test]
    fn test_credit_sums_span_semesters() {
        let mut program = program();
        with_semester(
            &mut program,
            1,
            vec![graded_module("A", 5, 1, 2.0), open_module("B", 10, 1)],
        );
        with_semester(&mut program, 2, vec![graded_module("C", 8, 2, 3.0)]);

        assert_eq!(program.total_credits(), 23);
        assert_eq!(program.achieved_credits(), 13);
    }

    #[test]
    fn test_semester_mut_finds_by_number() {
        let mut program = program();
        with_semester(&mut program, 2, vec![]);

        assert!(program.semester_mut(2).is_some());
        assert!(program.semester_mut(1).is_none());
    }
}
