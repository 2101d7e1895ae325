//! Interactive prompt helpers for the dashboard session
//!
//! All helpers read from a caller-supplied [`BufRead`] so tests can drive them
//! with in-memory cursors. They return `None` when input is exhausted (EOF),
//! which callers treat as cancelling the current operation.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Read one trimmed line after printing a prompt. Returns `None` on EOF or read error.
pub fn prompt_line(reader: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Re-prompt until a non-empty line is entered. Returns `None` on EOF.
pub fn prompt_non_empty(reader: &mut impl BufRead, prompt: &str) -> Option<String> {
    loop {
        let line = prompt_line(reader, prompt)?;
        if !line.is_empty() {
            return Some(line);
        }
        println!("A value is required.");
    }
}

/// Re-prompt until the line parses as `T`. Returns `None` on EOF.
pub fn prompt_parse<T: FromStr>(reader: &mut impl BufRead, prompt: &str) -> Option<T> {
    loop {
        let line = prompt_non_empty(reader, prompt)?;
        match line.parse::<T>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Invalid value: '{line}'"),
        }
    }
}

/// Re-prompt until the line parses as an ISO date (YYYY-MM-DD). Returns `None` on EOF.
pub fn prompt_date(reader: &mut impl BufRead, prompt: &str) -> Option<NaiveDate> {
    loop {
        let line = prompt_non_empty(reader, prompt)?;
        match NaiveDate::parse_from_str(&line, "%Y-%m-%d") {
            Ok(date) => return Some(date),
            Err(_) => println!("Please use the YYYY-MM-DD format."),
        }
    }
}

/// Prompt for a grade where an empty line means "no result yet".
///
/// Returns `None` on EOF, `Some(None)` when the line was empty, and
/// `Some(Some(grade))` once a number was entered. Unparseable input re-prompts.
pub fn prompt_optional_grade(reader: &mut impl BufRead, prompt: &str) -> Option<Option<f64>> {
    loop {
        let line = prompt_line(reader, prompt)?;
        if line.is_empty() {
            return Some(None);
        }
        match line.parse::<f64>() {
            Ok(grade) => return Some(Some(grade)),
            Err(_) => println!("Invalid grade: '{line}'"),
        }
    }
}

/// Ask a yes/no question. Only `y`/`yes` (case-insensitive) count as yes;
/// everything else, including EOF, counts as no.
pub fn confirm(reader: &mut impl BufRead, prompt: &str) -> bool {
    prompt_line(reader, prompt)
        .is_some_and(|line| line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_line_trims_and_ends_at_eof() {
        let mut input = Cursor::new("  hello  \n");
        assert_eq!(prompt_line(&mut input, "> "), Some("hello".to_string()));
        assert_eq!(prompt_line(&mut input, "> "), None);
    }

    #[test]
    fn test_prompt_non_empty_skips_blank_lines() {
        let mut input = Cursor::new("\n   \nMathematik 1\n");
        assert_eq!(
            prompt_non_empty(&mut input, "> "),
            Some("Mathematik 1".to_string())
        );
    }

    #[test]
    fn test_prompt_parse_retries_until_valid() {
        let mut input = Cursor::new("abc\n4.5\n7\n");
        assert_eq!(prompt_parse::<u32>(&mut input, "> "), Some(7));
    }

    #[test]
    fn test_prompt_parse_none_on_eof() {
        let mut input = Cursor::new("not a number\n");
        assert_eq!(prompt_parse::<u32>(&mut input, "> "), None);
    }

    #[test]
    fn test_prompt_date_requires_iso_format() {
        let mut input = Cursor::new("15.03.2025\n2025-03-15\n");
        let date = prompt_date(&mut input, "> ");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 15));
    }

    #[test]
    fn test_prompt_optional_grade_empty_means_pending() {
        let mut input = Cursor::new("\n");
        assert_eq!(prompt_optional_grade(&mut input, "> "), Some(None));
    }

    #[test]
    fn test_prompt_optional_grade_parses_value() {
        let mut input = Cursor::new("x\n2.3\n");
        assert_eq!(prompt_optional_grade(&mut input, "> "), Some(Some(2.3)));
    }

    #[test]
    fn test_confirm_accepts_yes_variants_only() {
        let mut yes = Cursor::new("YES\n");
        assert!(confirm(&mut yes, "? "));

        let mut no = Cursor::new("nope\n");
        assert!(!confirm(&mut no, "? "));

        let mut eof = Cursor::new("");
        assert!(!confirm(&mut eof, "? "));
    }
}
