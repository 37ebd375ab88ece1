//! Docking-quality grammar for pDockQ output.
//!
//! The pDockQ script reports its result as `pDockQ= 0.608 ,PPV= 0.9400192`. Whitespace
//! anywhere in the line is ignored.

use super::{GrammarError, find_marker_line, parse_field};

pub const MARKER: &str = "pDockQ=";
const PPV_PREFIX: &str = "PPV=";

/// Predicted docking quality and its positive predictive value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockingQuality {
    pub p_dock_q: f64,
    pub ppv: f64,
}

/// Extracts the docking-quality record from captured pDockQ output.
///
/// Scanning stops at the first `pDockQ=` line. Returns `Ok(None)` when no such line exists.
///
/// # Errors
///
/// [`GrammarError::FieldCount`] unless the line splits into exactly two comma-separated
/// parts, [`GrammarError::MissingLabel`] when the second part is not `PPV=`, and
/// [`GrammarError::InvalidNumber`] when either value is not numeric.
pub fn parse(output: &str) -> Result<Option<DockingQuality>, GrammarError> {
    let Some(line) = find_marker_line(output, MARKER) else {
        return Ok(None);
    };

    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<&str> = compact.split(',').collect();
    let [first, second] = parts.as_slice() else {
        return Err(GrammarError::field_count(MARKER, 2, parts.len(), line));
    };

    let p_dock_q = first
        .strip_prefix(MARKER)
        .ok_or_else(|| GrammarError::missing_label(MARKER, 1, MARKER, line))?;
    let ppv = second
        .strip_prefix(PPV_PREFIX)
        .ok_or_else(|| GrammarError::missing_label(MARKER, 2, PPV_PREFIX, line))?;

    Ok(Some(DockingQuality {
        p_dock_q: parse_field(MARKER, 1, p_dock_q)?,
        ppv: parse_field(MARKER, 2, ppv)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_line() {
        let output = "Reading /data/pdb/fold_model_0.pdb\npDockQ= 0.608 ,PPV= 0.9400192\n";

        let quality = parse(output).expect("well-formed").expect("record present");

        assert_eq!(
            quality,
            DockingQuality {
                p_dock_q: 0.608,
                ppv: 0.9400192
            }
        );
    }

    #[test]
    fn missing_ppv_segment_is_rejected() {
        let err = parse("pDockQ= 0.608\n").expect_err("single field");

        assert!(matches!(
            err,
            GrammarError::FieldCount {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn wrong_second_label_is_rejected() {
        let err = parse("pDockQ= 0.608 ,NPV= 0.94").expect_err("wrong label");

        assert!(matches!(
            err,
            GrammarError::MissingLabel {
                position: 2,
                prefix: "PPV=",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = parse("pDockQ= nan? ,PPV= 0.94").expect_err("bad number");

        assert_eq!(err, GrammarError::invalid_number(MARKER, 1, "nan?"));
    }

    #[test]
    fn only_first_marker_line_is_used() {
        let output = "pDockQ= 0.1 ,PPV= 0.2\npDockQ= 0.9 ,PPV= 0.99\n";

        let quality = parse(output).expect("well-formed").expect("record present");

        assert_eq!(quality.p_dock_q, 0.1);
    }

    #[test]
    fn first_malformed_line_is_not_rescued_by_later_lines() {
        let output = "pDockQ= 0.1\npDockQ= 0.9 ,PPV= 0.99\n";

        assert!(parse(output).is_err());
    }

    #[test]
    fn output_without_marker_yields_no_record() {
        let parsed = parse("Error: no interface found\n").expect("absence is not an error");

        assert!(parsed.is_none());
    }

    #[test]
    fn indented_marker_line_is_recognized() {
        let quality = parse("   pDockQ=0.25,PPV=0.5   ")
            .expect("well-formed")
            .expect("record present");

        assert_eq!(quality.ppv, 0.5);
    }
}
