//! Interactive dashboard session
//!
//! Menu-driven session over the stored degree program. Every successful edit
//! is saved before the menu is shown again, so a killed session never loses
//! more than the prompt currently on screen.

use std::io::{self, BufRead};

use studytrack::config::Config;
use studytrack::core::models::{CourseModule, DegreeProgram, Exam, ExamKind, ExamStatus, Semester};
use studytrack::core::persistence::DataStore;
use studytrack::{error, info};

use crate::input;
use crate::ui;

/// Run the interactive dashboard session.
///
/// An unreadable program document is reported and then treated like a
/// missing one, so the session always starts. Failures inside the session
/// are reported inline and the menu is shown again.
pub fn run(config: &Config) {
    let store = super::data_store(config);
    let mut program = super::load_or_fresh(&store);

    if let Some(current) = &program {
        info!("Loaded program '{}'", current.name());
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        match &program {
            Some(current) => print!("{}", ui::render_dashboard(current)),
            None => println!("\nNo degree program yet. Start by creating one."),
        }
        print!("{}", ui::render_menu());

        let Some(choice) = input::prompt_line(&mut reader, "> ") else {
            break;
        };

        match choice.as_str() {
            "1" => {
                if create_program(&mut reader, &mut program) {
                    if let Some(current) = &program {
                        save(&store, current);
                    }
                }
            }
            "2" => match &mut program {
                Some(current) => {
                    if add_module(&mut reader, current) {
                        save(&store, current);
                    }
                }
                None => println!("✗ Create a degree program first."),
            },
            "3" => match &mut program {
                Some(current) => {
                    if record_exam_result(&mut reader, current) {
                        save(&store, current);
                    }
                }
                None => println!("✗ Create a degree program first."),
            },
            "4" => match &program {
                Some(current) => print!("{}", ui::render_module_table(current)),
                None => println!("✗ Create a degree program first."),
            },
            "5" => match &program {
                Some(current) => print!("{}", ui::render_analysis(current)),
                None => println!("✗ Create a degree program first."),
            },
            "6" | "q" | "quit" => break,
            other => println!("Unknown option: '{other}'"),
        }
    }

    println!("Bye.");
}

fn save(store: &DataStore, program: &DegreeProgram) {
    match store.save(program) {
        Ok(()) => info!("Program saved to {}", store.path().display()),
        Err(e) => {
            error!("Failed to save program: {e}");
            eprintln!("✗ Failed to save: {e}");
        }
    }
}

/// Menu action 1. Returns `true` when a new program replaced the old state.
fn create_program(reader: &mut impl BufRead, program: &mut Option<DegreeProgram>) -> bool {
    if program.is_some() && !input::confirm(reader, "A program already exists. Replace it? (y/n): ")
    {
        println!("✗ Cancelled");
        return false;
    }

    let Some(name) = input::prompt_non_empty(reader, "Program name: ") else {
        return false;
    };
    let Some(target_semesters) = input::prompt_parse::<u32>(reader, "Target semesters: ") else {
        return false;
    };
    let Some(target_grade) = input::prompt_parse::<f64>(reader, "Target grade (1.0-5.0): ") else {
        return false;
    };

    match DegreeProgram::new(name, target_semesters, target_grade) {
        Ok(created) => {
            println!("✓ Created program '{}'", created.name());
            *program = Some(created);
            true
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

/// Menu action 2. Returns `true` when the module was added.
///
/// The module lands in the semester matching its planned number; the semester
/// is created on first use and the sequence re-sorted so out-of-order entry
/// keeps the overview readable.
fn add_module(reader: &mut impl BufRead, program: &mut DegreeProgram) -> bool {
    let Some(name) = input::prompt_non_empty(reader, "Module name: ") else {
        return false;
    };
    let Some(credits) = input::prompt_parse::<u32>(reader, "ECTS credits: ") else {
        return false;
    };
    let Some(planned_semester) = input::prompt_parse::<u32>(reader, "Planned semester: ") else {
        return false;
    };

    let module = match CourseModule::new(name, credits, planned_semester) {
        Ok(module) => module,
        Err(e) => {
            println!("✗ {e}");
            return false;
        }
    };

    if program.semester_mut(planned_semester).is_none() {
        match Semester::new(planned_semester) {
            Ok(semester) => {
                program.add_semester(semester);
                program.sort_semesters();
            }
            Err(e) => {
                println!("✗ {e}");
                return false;
            }
        }
    }

    if let Some(semester) = program.semester_mut(planned_semester) {
        println!(
            "✓ Added module '{}' to semester {planned_semester}",
            module.name()
        );
        semester.add_module(module);
    }
    true
}

/// Menu action 3. Returns `true` when a result or a new attempt was recorded.
///
/// When the latest attempt of the module is still pending, its grade is
/// recorded. Otherwise a new attempt is created, optionally graded right away.
fn record_exam_result(reader: &mut impl BufRead, program: &mut DegreeProgram) -> bool {
    let Some(name) = input::prompt_non_empty(reader, "Module name: ") else {
        return false;
    };
    let Some(module) = find_module_mut(program, &name) else {
        println!("✗ No module named '{name}'");
        return false;
    };
    let module_name = module.name().to_string();

    if let Some(pending) = module
        .exams_mut()
        .last_mut()
        .filter(|exam| exam.status() == ExamStatus::Planned)
    {
        let Some(grade) = input::prompt_parse::<f64>(reader, "Grade (1.0-5.0): ") else {
            return false;
        };
        return match pending.record_result(grade) {
            Ok(()) => {
                println!("✓ Recorded {grade:.1} for '{module_name}'");
                true
            }
            Err(e) => {
                println!("✗ {e}");
                false
            }
        };
    }

    let Some(kind) = prompt_exam_kind(reader) else {
        return false;
    };
    let Some(date) = input::prompt_date(reader, "Exam date (YYYY-MM-DD): ") else {
        return false;
    };
    let Some(grade) = input::prompt_optional_grade(reader, "Grade (empty if pending): ") else {
        return false;
    };

    let mut exam = Exam::new(kind, date);
    if let Some(grade) = grade {
        if let Err(e) = exam.record_result(grade) {
            println!("✗ {e}");
            return false;
        }
    }

    match module.add_exam(exam) {
        Ok(()) => {
            match grade {
                Some(grade) => println!("✓ Recorded {grade:.1} for '{module_name}'"),
                None => println!("✓ Planned {kind} for '{module_name}'"),
            }
            true
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn prompt_exam_kind(reader: &mut impl BufRead) -> Option<ExamKind> {
    println!("Exam kind:");
    for (index, kind) in ExamKind::ALL.iter().enumerate() {
        println!("  [{}] {kind}", index + 1);
    }
    loop {
        let choice = input::prompt_parse::<usize>(reader, "> ")?;
        if (1..=ExamKind::ALL.len()).contains(&choice) {
            return Some(ExamKind::ALL[choice - 1]);
        }
        println!("Please choose 1-{}", ExamKind::ALL.len());
    }
}

fn find_module_mut<'a>(
    program: &'a mut DegreeProgram,
    name: &str,
) -> Option<&'a mut CourseModule> {
    program
        .semesters_mut()
        .iter_mut()
        .flat_map(|semester| semester.modules_mut().iter_mut())
        .find(|module| module.name().eq_ignore_ascii_case(name))
}
