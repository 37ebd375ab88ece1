//! Interface-contact grammar for PRODIGY output.
//!
//! The modified PRODIGY predictor prints one summary line of the form
//! `output:<f1>,<f2>,...,<f12>`; the twelve values map positionally onto
//! [`InterfaceContacts`].

use super::{GrammarError, find_marker_line, parse_field};

pub const MARKER: &str = "output:";

/// Number of comma-separated values on the `output:` line.
pub const FIELD_COUNT: usize = 12;

/// Report column names, in the order the tool prints the values.
pub const COLUMN_NAMES: [&str; FIELD_COUNT] = [
    "No. of intermolecular contacts",
    "No. of charged-charged contacts",
    "No. of charged-polar contacts",
    "No. of charged-apolar contacts",
    "No. of polar-polar contacts",
    "No. of apolar-polar contacts",
    "No. of apolar-apolar contacts",
    "Percentage of apolar NIS residues",
    "Percentage of charged NIS residues",
    "Predicted binding affinity (kcal.mol-1)",
    "Temperature",
    "Predicted dissociation constant (M)",
];

/// Interface contact counts and affinity predictions for one complex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceContacts {
    pub intermolecular_contacts: f64,
    pub charged_charged_contacts: f64,
    pub charged_polar_contacts: f64,
    pub charged_apolar_contacts: f64,
    pub polar_polar_contacts: f64,
    pub apolar_polar_contacts: f64,
    pub apolar_apolar_contacts: f64,
    /// Percentage of apolar non-interacting surface residues.
    pub apolar_nis_percentage: f64,
    /// Percentage of charged non-interacting surface residues.
    pub charged_nis_percentage: f64,
    /// Predicted ΔG in kcal/mol.
    pub binding_affinity: f64,
    /// Temperature in °C used for the dissociation constant.
    pub temperature: f64,
    /// Predicted Kd in molar.
    pub dissociation_constant: f64,
}

impl InterfaceContacts {
    pub fn from_fields(fields: [f64; FIELD_COUNT]) -> Self {
        let [
            intermolecular_contacts,
            charged_charged_contacts,
            charged_polar_contacts,
            charged_apolar_contacts,
            polar_polar_contacts,
            apolar_polar_contacts,
            apolar_apolar_contacts,
            apolar_nis_percentage,
            charged_nis_percentage,
            binding_affinity,
            temperature,
            dissociation_constant,
        ] = fields;

        Self {
            intermolecular_contacts,
            charged_charged_contacts,
            charged_polar_contacts,
            charged_apolar_contacts,
            polar_polar_contacts,
            apolar_polar_contacts,
            apolar_apolar_contacts,
            apolar_nis_percentage,
            charged_nis_percentage,
            binding_affinity,
            temperature,
            dissociation_constant,
        }
    }

    /// Values in [`COLUMN_NAMES`] order.
    pub fn to_fields(&self) -> [f64; FIELD_COUNT] {
        [
            self.intermolecular_contacts,
            self.charged_charged_contacts,
            self.charged_polar_contacts,
            self.charged_apolar_contacts,
            self.polar_polar_contacts,
            self.apolar_polar_contacts,
            self.apolar_apolar_contacts,
            self.apolar_nis_percentage,
            self.charged_nis_percentage,
            self.binding_affinity,
            self.temperature,
            self.dissociation_constant,
        ]
    }
}

/// Extracts the contact record from captured PRODIGY output.
///
/// Only the first `output:` line is considered. Returns `Ok(None)` when no such line exists.
///
/// # Errors
///
/// [`GrammarError::FieldCount`] when the line does not carry exactly twelve values and
/// [`GrammarError::InvalidNumber`] when a value is not numeric.
pub fn parse(output: &str) -> Result<Option<InterfaceContacts>, GrammarError> {
    let Some(line) = find_marker_line(output, MARKER) else {
        return Ok(None);
    };

    let payload = line[MARKER.len()..].trim();
    let values: Vec<&str> = payload.split(',').collect();
    if values.len() != FIELD_COUNT {
        return Err(GrammarError::field_count(
            MARKER,
            FIELD_COUNT,
            values.len(),
            line,
        ));
    }

    let mut fields = [0.0; FIELD_COUNT];
    for (i, (slot, value)) in fields.iter_mut().zip(values).enumerate() {
        *slot = parse_field(MARKER, i + 1, value)?;
    }

    Ok(Some(InterfaceContacts::from_fields(fields)))
}
