//! Grammars for the text emitted by the external scoring tools.
//!
//! Each grammar scans the captured output of one tool invocation for a marker line, splits it
//! into a fixed number of fields, and parses every field as a number. A missing marker line
//! yields `Ok(None)`; a marker line of the wrong shape yields a [`GrammarError`].

pub mod contacts;
pub mod docking;
mod error;

pub use contacts::InterfaceContacts;
pub use docking::DockingQuality;
pub use error::GrammarError;

/// Parses a field as `f64`, reporting its 1-based position on failure.
fn parse_field(
    marker: &'static str,
    position: usize,
    value: &str,
) -> Result<f64, GrammarError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| GrammarError::invalid_number(marker, position, value.trim()))
}

/// Returns the first line whose trimmed form starts with `marker`, trimmed.
fn find_marker_line<'a>(output: &'a str, marker: &str) -> Option<&'a str> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(marker))
}
