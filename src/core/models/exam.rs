//! Exam attempt model

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// Best possible grade on the German scale.
pub const BEST_GRADE: f64 = 1.0;

/// Worst possible grade on the German scale.
pub const WORST_GRADE: f64 = 5.0;

/// Highest grade that still passes an exam.
pub const PASSING_GRADE: f64 = 4.0;

/// Lifecycle state of a single exam attempt.
///
/// Serialized by symbolic name in the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamStatus {
    /// Created but no result recorded yet
    Planned,
    /// Recorded grade is within the passing range
    Passed,
    /// Recorded grade is outside the passing range
    Failed,
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Planned => "PLANNED",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        };
        write!(f, "{name}")
    }
}

/// The four examination forms.
///
/// They differ only in how they are labelled; the passing rule is shared by
/// all of them. The persistence codec maps each kind to its own document tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamKind {
    /// Supervised written examination
    Written,
    /// Portfolio of submitted work
    Portfolio,
    /// Written case study elaboration
    CaseStudy,
    /// Oral examination
    Oral,
}

impl ExamKind {
    /// All kinds in presentation order, used by selection prompts.
    pub const ALL: [Self; 4] = [Self::Written, Self::Portfolio, Self::CaseStudy, Self::Oral];
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Written => "Written Exam",
            Self::Portfolio => "Portfolio",
            Self::CaseStudy => "Case Study",
            Self::Oral => "Oral Exam",
        };
        write!(f, "{name}")
    }
}

/// A single examination attempt belonging to a module.
///
/// An attempt starts out [`ExamStatus::Planned`] with no grade. Recording a
/// result sets the grade and re-evaluates the status from it; the two fields
/// always move together.
#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    kind: ExamKind,
    date: NaiveDate,
    grade: Option<f64>,
    status: ExamStatus,
}

impl Exam {
    /// Create a new attempt with no result.
    ///
    /// # Arguments
    /// * `kind` - Examination form
    /// * `date` - Scheduled or actual examination date
    #[must_use]
    pub const fn new(kind: ExamKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            grade: None,
            status: ExamStatus::Planned,
        }
    }

    /// Rebuild an attempt from persisted leaf state.
    ///
    /// Grade and status are taken as stored; they are independent leaf state
    /// and must not be re-derived on load.
    #[must_use]
    pub(crate) const fn from_parts(
        kind: ExamKind,
        date: NaiveDate,
        grade: Option<f64>,
        status: ExamStatus,
    ) -> Self {
        Self {
            kind,
            date,
            grade,
            status,
        }
    }

    /// Record a result for this attempt.
    ///
    /// Sets the grade and re-evaluates the status: a grade up to
    /// [`PASSING_GRADE`] passes, anything above fails. Recording again
    /// replaces the previous result.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidGrade`] if the grade is outside the
    /// 1.0 to 5.0 scale; the attempt is left untouched in that case.
    pub fn record_result(&mut self, grade: f64) -> Result<(), DomainError> {
        if !(BEST_GRADE..=WORST_GRADE).contains(&grade) {
            return Err(DomainError::InvalidGrade(grade));
        }

        self.grade = Some(grade);
        self.status = if grade <= PASSING_GRADE {
            ExamStatus::Passed
        } else {
            ExamStatus::Failed
        };
        Ok(())
    }

    /// Whether this attempt passed.
    ///
    /// # Errors
    /// Returns [`DomainError::NotGraded`] if no result has been recorded.
    pub fn is_passed(&self) -> Result<bool, DomainError> {
        match self.status {
            ExamStatus::Planned => Err(DomainError::NotGraded),
            status => Ok(status == ExamStatus::Passed),
        }
    }

    /// Examination form of this attempt
    #[must_use]
    pub const fn kind(&self) -> ExamKind {
        self.kind
    }

    /// Examination date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Recorded grade, if any
    #[must_use]
    pub const fn grade(&self) -> Option<f64> {
        self.grade
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> ExamStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam_on(kind: ExamKind) -> Exam {
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        Exam::new(kind, date)
    }

    #[test]
    fn test_new_exam_is_planned_without_grade() {
        let exam = exam_on(ExamKind::Written);

        assert_eq!(exam.status(), ExamStatus::Planned);
        assert!(exam.grade().is_none());
        assert_eq!(exam.kind(), ExamKind::Written);
    }

    #[test]
    fn test_record_passing_grade() {
        let mut exam = exam_on(ExamKind::Written);

        exam.record_result(2.3).unwrap();

        assert_eq!(exam.status(), ExamStatus::Passed);
        assert!((exam.grade().unwrap() - 2.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_best_grade_passes() {
        let mut exam = exam_on(ExamKind::Oral);

        exam.record_result(1.0).unwrap();

        assert_eq!(exam.status(), ExamStatus::Passed);
    }

    #[test]
    fn test_boundary_grade_four_passes() {
        let mut exam = exam_on(ExamKind::Portfolio);

        exam.record_result(4.0).unwrap();

        assert_eq!(exam.status(), ExamStatus::Passed);
    }

    #[test]
    fn test_grade_above_four_fails() {
        let mut exam = exam_on(ExamKind::CaseStudy);

        exam.record_result(4.3).unwrap();

        assert_eq!(exam.status(), ExamStatus::Failed);
    }

    #[test]
    fn test_worst_grade_fails() {
        let mut exam = exam_on(ExamKind::Written);

        exam.record_result(5.0).unwrap();

        assert_eq!(exam.status(), ExamStatus::Failed);
    }

    #[test]
    fn test_grade_below_scale_is_rejected() {
        let mut exam = exam_on(ExamKind::Written);

        let err = exam.record_result(0.9).unwrap_err();

        assert!(matches!(err, DomainError::InvalidGrade(_)));
        // Prior state untouched
        assert_eq!(exam.status(), ExamStatus::Planned);
        assert!(exam.grade().is_none());
    }

    #[test]
    fn test_grade_above_scale_is_rejected() {
        let mut exam = exam_on(ExamKind::Written);
        exam.record_result(2.0).unwrap();

        let err = exam.record_result(5.1).unwrap_err();

        assert!(matches!(err, DomainError::InvalidGrade(_)));
        // Previous result survives the rejected update
        assert_eq!(exam.status(), ExamStatus::Passed);
        assert!((exam.grade().unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recording_again_reevaluates_status() {
        let mut exam = exam_on(ExamKind::Written);

        exam.record_result(1.7).unwrap();
        assert_eq!(exam.status(), ExamStatus::Passed);

        exam.record_result(4.7).unwrap();
        assert_eq!(exam.status(), ExamStatus::Failed);
        assert!((exam.grade().unwrap() - 4.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_passed_requires_grade() {
        let exam = exam_on(ExamKind::Oral);

        let err = exam.is_passed().unwrap_err();

        assert!(matches!(err, DomainError::NotGraded));
    }

    #[test]
    fn test_is_passed_after_grading() {
        let mut exam = exam_on(ExamKind::Oral);

        exam.record_result(3.0).unwrap();
        assert!(exam.is_passed().unwrap());

        exam.record_result(4.7).unwrap();
        assert!(!exam.is_passed().unwrap());
    }

    #[test]
    fn test_from_parts_restores_leaf_state() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 2).unwrap();
        let exam = Exam::from_parts(ExamKind::Portfolio, date, Some(2.0), ExamStatus::Passed);

        assert_eq!(exam.status(), ExamStatus::Passed);
        assert!((exam.grade().unwrap() - 2.0).abs() < f64::EPSILON);
        assert_eq!(exam.date(), date);
    }

    #[test]
    fn test_kind_display_names() {
        assert_eq!(ExamKind::Written.to_string(), "Written Exam");
        assert_eq!(ExamKind::Portfolio.to_string(), "Portfolio");
        assert_eq!(ExamKind::CaseStudy.to_string(), "Case Study");
        assert_eq!(ExamKind::Oral.to_string(), "Oral Exam");
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(ExamStatus::Planned.to_string(), "PLANNED");
        assert_eq!(ExamStatus::Passed.to_string(), "PASSED");
        assert_eq!(ExamStatus::Failed.to_string(), "FAILED");
    }
}
