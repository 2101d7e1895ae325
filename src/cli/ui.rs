//! Terminal rendering for the dashboard views
//!
//! Pure string builders, kept free of I/O so the views can be unit tested
//! without a terminal.

use std::fmt::Write;

use studytrack::core::analysis::ProgressAnalyzer;
use studytrack::core::models::{CourseModule, DegreeProgram};

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 20;

/// Render the dashboard menu.
#[must_use]
pub fn render_menu() -> String {
    let mut out = String::new();
    out.push_str("\n--- studytrack ---\n");
    out.push_str(" [1] Create degree program\n");
    out.push_str(" [2] Add module\n");
    out.push_str(" [3] Record exam result\n");
    out.push_str(" [4] Module overview\n");
    out.push_str(" [5] Progress analysis\n");
    out.push_str(" [6] Quit\n");
    out
}

/// Render the program header with credit progress and average grade.
#[must_use]
pub fn render_dashboard(program: &DegreeProgram) -> String {
    let analyzer = ProgressAnalyzer::new(program);
    let percent = analyzer.completion_ratio() * 100.0;

    let mut out = String::new();
    let _ = writeln!(out, "\n=== {} ===", program.name());
    let _ = writeln!(
        out,
        "Semester {} of {} | {} of {} ECTS",
        program.current_semester(),
        program.target_semesters(),
        program.achieved_credits(),
        program.total_credits()
    );
    let _ = writeln!(
        out,
        "[{}] {percent:>5.1}%",
        progress_bar(analyzer.completion_ratio(), BAR_WIDTH)
    );
    let _ = writeln!(
        out,
        "Average grade: {} (target {:.1})",
        format_grade(program.average_grade()),
        program.target_grade()
    );
    out
}

/// Render the module overview table, grouped by semester.
#[must_use]
pub fn render_module_table(program: &DegreeProgram) -> String {
    let mut out = String::new();
    out.push_str("\n=== Module Overview ===\n\n");

    if program.all_modules().next().is_none() {
        out.push_str("No modules recorded yet.\n");
        return out;
    }

    let name_width = column_width(program.all_modules().map(CourseModule::name), "Module");

    let _ = writeln!(
        out,
        "Sem  {:<name_width$}  ECTS  {:<16}  Grade  Attempts left",
        "Module", "Status"
    );
    for semester in program.semesters() {
        for module in semester.modules() {
            let status = module.status().to_string();
            let _ = writeln!(
                out,
                "{:>3}  {:<name_width$}  {:>4}  {status:<16}  {:>5}  {}",
                semester.number(),
                module.name(),
                module.credits(),
                format_grade(module.best_grade()),
                module.remaining_attempts()
            );
        }
    }
    out
}

/// Render the progress analysis view.
#[must_use]
pub fn render_analysis(program: &DegreeProgram) -> String {
    let analyzer = ProgressAnalyzer::new(program);

    let completion = analyzer.completion_ratio();
    let expected = analyzer.expected_ratio();

    let mut out = String::new();
    out.push_str("\n=== Progress Analysis ===\n\n");
    let _ = writeln!(out, "Status: {}", analyzer.ects_trend());
    let _ = writeln!(
        out,
        "Completed: {} of {} ECTS ({:.1}%)",
        program.achieved_credits(),
        program.total_credits(),
        completion * 100.0
    );
    let _ = writeln!(out, "Expected by now: {:.1}%", expected * 100.0);
    let _ = writeln!(out, "[{}]", trend_bar(completion, expected, BAR_WIDTH));
    match analyzer.predict_graduation() {
        Some(date) => {
            let _ = writeln!(out, "Projected graduation: {date}");
        }
        None => out.push_str("Projected graduation: not reachable\n"),
    }
    let _ = writeln!(
        out,
        "Average grade: {} (target {:.1})",
        format_grade(program.average_grade()),
        program.target_grade()
    );

    let risks = analyzer.risk_modules();
    if risks.is_empty() {
        out.push_str("\nAt-risk modules: none\n");
    } else {
        out.push_str("\nAt-risk modules:\n");
        let name_width = column_width(risks.iter().map(|risk| risk.module.name()), "");
        for risk in &risks {
            let _ = writeln!(
                out,
                "  {:<name_width$}  {}",
                risk.module.name(),
                risk.reason
            );
        }
    }
    out
}

fn format_grade(grade: Option<f64>) -> String {
    grade.map_or_else(|| "-".to_string(), |value| format!("{value:.1}"))
}

fn column_width<'a>(names: impl Iterator<Item = &'a str>, header: &str) -> usize {
    names
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max(header.len())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(width - filled));
    bar
}

/// Progress bar with a `|` marker at the expected position, so the achieved
/// fill can be read against where it should be by now.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn trend_bar(completion: f64, expected: f64, width: usize) -> String {
    let filled = (completion.clamp(0.0, 1.0) * width as f64).round() as usize;
    let marker = ((expected.clamp(0.0, 1.0) * width as f64).round() as usize)
        .min(width.saturating_sub(1));
    let mut bar: Vec<char> = (0..width)
        .map(|slot| if slot < filled { '#' } else { '-' })
        .collect();
    if let Some(slot) = bar.get_mut(marker) {
        *slot = '|';
    }
    bar.into_iter().collect()
}
