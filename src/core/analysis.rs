//! Progress analysis over a degree program
//!
//! Read-only analytics consumed by the dashboard: credit-trend
//! classification against the target timeline, a projected graduation date,
//! and the list of modules that endanger completion. Everything here derives
//! from the live graph on each call; nothing is cached.

use std::fmt;

use chrono::{Duration, Local, NaiveDate};

use crate::core::models::{CourseModule, DegreeProgram, ModuleStatus};

/// Assumed length of one academic semester.
const DAYS_PER_SEMESTER: i64 = 180;

/// Fraction of the expected completion ratio still counted as only slightly
/// behind.
const SLIP_TOLERANCE: f64 = 0.75;

/// Credit-accumulation trend relative to the target timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EctsTrend {
    /// Completion ratio meets or exceeds the expected ratio
    OnTrack,
    /// Within the tolerance band below the expected ratio
    SlightlyBehind,
    /// Below the tolerance band
    SignificantlyBehind,
    /// The degree can no longer be completed
    Critical,
}

impl fmt::Display for EctsTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::OnTrack => "on track",
            Self::SlightlyBehind => "slightly behind schedule",
            Self::SignificantlyBehind => "significantly behind schedule",
            Self::Critical => "critical: degree can no longer be completed",
        };
        write!(f, "{text}")
    }
}

/// Why a module shows up in the risk list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskReason {
    /// All attempts used without a pass
    AttemptsExhausted,
    /// Failed so far, retry still possible
    FailedRetryPossible,
    /// Planned for a semester that has already passed
    Overdue,
    /// In progress with at most one attempt remaining
    LastAttempt,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AttemptsExhausted => "no attempts left",
            Self::FailedRetryPossible => "failed, retry possible",
            Self::Overdue => "overdue, not started",
            Self::LastAttempt => "last attempt",
        };
        write!(f, "{text}")
    }
}

/// A module flagged by the risk scan, with the reason it was flagged.
#[derive(Debug, Clone, Copy)]
pub struct RiskModule<'a> {
    /// The flagged module
    pub module: &'a CourseModule,
    /// Why it was flagged
    pub reason: RiskReason,
}

/// Analyzer over one degree program.
pub struct ProgressAnalyzer<'a> {
    program: &'a DegreeProgram,
}

impl<'a> ProgressAnalyzer<'a> {
    /// Create an analyzer for the given program.
    #[must_use]
    pub const fn new(program: &'a DegreeProgram) -> Self {
        Self { program }
    }

    /// Achieved share of all program credits, 0 when no module carries
    /// credits yet.
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        let total = self.program.total_credits();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.program.achieved_credits()) / f64::from(total)
    }

    /// Share of the program that should be complete by now, assuming even
    /// credit distribution over the target semesters.
    #[must_use]
    pub fn expected_ratio(&self) -> f64 {
        let semesters_used = self.program.current_semester().saturating_sub(1).max(1);
        f64::from(semesters_used) / f64::from(self.program.target_semesters())
    }

    /// Classify the credit trend against the target timeline.
    #[must_use]
    pub fn ects_trend(&self) -> EctsTrend {
        if !self.program.is_completable() {
            return EctsTrend::Critical;
        }

        let completion = self.completion_ratio();
        let expected = self.expected_ratio();
        if completion >= expected {
            EctsTrend::OnTrack
        } else if completion >= expected * SLIP_TOLERANCE {
            EctsTrend::SlightlyBehind
        } else {
            EctsTrend::SignificantlyBehind
        }
    }

    /// Projected graduation date from today.
    ///
    /// # Returns
    /// `None` if the degree can no longer be completed.
    #[must_use]
    pub fn predict_graduation(&self) -> Option<NaiveDate> {
        self.predict_graduation_from(Local::now().date_naive())
    }

    /// Projected graduation date counted from a given day.
    ///
    /// Projects one semester length per remaining semester. When the current
    /// semester has already run past the target count, the projection clamps
    /// to the given day instead of pointing into the past.
    #[must_use]
    pub fn predict_graduation_from(&self, today: NaiveDate) -> Option<NaiveDate> {
        if !self.program.is_completable() {
            return None;
        }

        let remaining = (i64::from(self.program.target_semesters())
            - i64::from(self.program.current_semester())
            + 1)
        .max(0);
        Some(today + Duration::days(DAYS_PER_SEMESTER * remaining))
    }

    /// Scan all modules for completion risks.
    ///
    /// Flags exhausted modules, failed-but-retryable modules, planned modules
    /// whose semester has already passed, and in-progress modules down to
    /// their last attempt.
    #[must_use]
    pub fn risk_modules(&self) -> Vec<RiskModule<'a>> {
        let current_semester = self.program.current_semester();

        self.program
            .all_modules()
            .filter_map(|module| {
                let reason = match module.status() {
                    ModuleStatus::NoMoreAttempts => Some(RiskReason::AttemptsExhausted),
                    ModuleStatus::Failed => Some(RiskReason::FailedRetryPossible),
                    ModuleStatus::Planned if module.planned_semester() < current_semester => {
                        Some(RiskReason::Overdue)
                    }
                    ModuleStatus::InProgress if module.remaining_attempts() <= 1 => {
                        Some(RiskReason::LastAttempt)
                    }
                    _ => None,
                };
                reason.map(|reason| RiskModule { module, reason })
            })
            .collect()
    }
}
