//! Tagged document codec for the program graph
//!
//! Maps the live entity tree to a nested JSON document and back. Every node
//! carries a `type` tag; for exam nodes the tag names the variant, so the
//! decoder can rebuild the right examination form without any out-of-band
//! information. Derived values (module status, credit sums, averages) are
//! never written: the decoder restores only identity fields and children and
//! lets every aggregate recompute from those.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::models::exam::{Exam, ExamKind, ExamStatus};
use crate::core::models::{CourseModule, DegreeProgram, Semester};

use super::{DecodeError, EncodeError};

/// Root node of the persisted document.
///
/// A single-variant tagged enum: deserializing anything whose `type` field is
/// not `Program` fails structurally instead of building a half-right graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ProgramDoc {
    Program {
        name: String,
        target_semesters: u32,
        target_grade: f64,
        semesters: Vec<SemesterDoc>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum SemesterDoc {
    Semester {
        number: u32,
        modules: Vec<ModuleDoc>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ModuleDoc {
    Module {
        name: String,
        credits: u32,
        planned_semester: u32,
        exams: Vec<ExamDoc>,
    },
}

/// Exam node; the tag doubles as the variant discriminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ExamDoc {
    WrittenExam(ExamBody),
    Portfolio(ExamBody),
    CaseStudyExam(ExamBody),
    OralExam(ExamBody),
}

/// Leaf state shared by all exam variants. Grade and status are stored as-is;
/// they are independent leaf state and are restored without re-derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExamBody {
    exam_date: NaiveDate,
    grade: Option<f64>,
    status: ExamStatus,
}

fn exam_doc(exam: &Exam) -> ExamDoc {
    let body = ExamBody {
        exam_date: exam.date(),
        grade: exam.grade(),
        status: exam.status(),
    };
    match exam.kind() {
        ExamKind::Written => ExamDoc::WrittenExam(body),
        ExamKind::Portfolio => ExamDoc::Portfolio(body),
        ExamKind::CaseStudy => ExamDoc::CaseStudyExam(body),
        ExamKind::Oral => ExamDoc::OralExam(body),
    }
}

fn module_doc(module: &CourseModule) -> ModuleDoc {
    ModuleDoc::Module {
        name: module.name().to_string(),
        credits: module.credits(),
        planned_semester: module.planned_semester(),
        exams: module.exams().iter().map(exam_doc).collect(),
    }
}

fn semester_doc(semester: &Semester) -> SemesterDoc {
    SemesterDoc::Semester {
        number: semester.number(),
        modules: semester.modules().iter().map(module_doc).collect(),
    }
}

fn program_doc(program: &DegreeProgram) -> ProgramDoc {
    ProgramDoc::Program {
        name: program.name().to_string(),
        target_semesters: program.target_semesters(),
        target_grade: program.target_grade(),
        semesters: program.semesters().iter().map(semester_doc).collect(),
    }
}

fn exam_from_doc(doc: ExamDoc) -> Exam {
    let (kind, body) = match doc {
        ExamDoc::WrittenExam(body) => (ExamKind::Written, body),
        ExamDoc::Portfolio(body) => (ExamKind::Portfolio, body),
        ExamDoc::CaseStudyExam(body) => (ExamKind::CaseStudy, body),
        ExamDoc::OralExam(body) => (ExamKind::Oral, body),
    };
    Exam::from_parts(kind, body.exam_date, body.grade, body.status)
}

fn module_from_doc(doc: ModuleDoc) -> Result<CourseModule, DecodeError> {
    let ModuleDoc::Module {
        name,
        credits,
        planned_semester,
        exams,
    } = doc;

    let mut module = CourseModule::new(name, credits, planned_semester)?;
    // Restored directly: a stored module may hold exactly MAX_ATTEMPTS
    // attempts, which the public append path would refuse.
    for exam in exams {
        module.restore_exam(exam_from_doc(exam));
    }
    Ok(module)
}

fn semester_from_doc(doc: SemesterDoc) -> Result<Semester, DecodeError> {
    let SemesterDoc::Semester { number, modules } = doc;

    let mut semester = Semester::new(number)?;
    for module in modules {
        semester.add_module(module_from_doc(module)?);
    }
    Ok(semester)
}

fn program_from_doc(doc: ProgramDoc) -> Result<DegreeProgram, DecodeError> {
    let ProgramDoc::Program {
        name,
        target_semesters,
        target_grade,
        semesters,
    } = doc;

    let mut program = DegreeProgram::new(name, target_semesters, target_grade)?;
    for semester in semesters {
        program.add_semester(semester_from_doc(semester)?);
    }
    Ok(program)
}

/// Serialize a program graph into the tagged JSON document.
///
/// # Errors
/// Returns [`EncodeError::Serialize`] if JSON serialization fails.
pub fn encode(program: &DegreeProgram) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(&program_doc(program))?)
}

/// Rebuild a program graph from the tagged JSON document.
///
/// Container nodes run through the regular entity constructors, so a
/// document carrying values the constructors reject fails here instead of
/// producing an entity no mutation path could have built.
///
/// # Errors
/// Returns [`DecodeError::Malformed`] for ill-formed JSON, unknown type
/// tags, or missing fields, and [`DecodeError::Invalid`] when a node fails
/// entity validation.
pub fn decode(text: &str) -> Result<DegreeProgram, DecodeError> {
    let doc: ProgramDoc = serde_json::from_str(text)?;
    program_from_doc(doc)
}
