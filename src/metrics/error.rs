use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    #[error("'{marker}' line has {found} fields, expected {expected}: {line}")]
    FieldCount {
        marker: &'static str,
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("'{marker}' line field {position} is missing the '{prefix}' label: {line}")]
    MissingLabel {
        marker: &'static str,
        position: usize,
        prefix: &'static str,
        line: String,
    },

    #[error("'{marker}' line field {position} is not a number: '{value}'")]
    InvalidNumber {
        marker: &'static str,
        position: usize,
        value: String,
    },
}

impl GrammarError {
    pub fn field_count(
        marker: &'static str,
        expected: usize,
        found: usize,
        line: impl Into<String>,
    ) -> Self {
        Self::FieldCount {
            marker,
            expected,
            found,
            line: line.into(),
        }
    }

    pub fn missing_label(
        marker: &'static str,
        position: usize,
        prefix: &'static str,
        line: impl Into<String>,
    ) -> Self {
        Self::MissingLabel {
            marker,
            position,
            prefix,
            line: line.into(),
        }
    }

    pub fn invalid_number(marker: &'static str, position: usize, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            marker,
            position,
            value: value.into(),
        }
    }
}
