use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

/// Coordinate record flavour carried by a residue (`ATOM` for polymers, `HETATM` otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    #[default]
    Atom,
    Hetatm,
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }

    pub fn is_polymer(&self) -> bool {
        matches!(self, RecordKind::Atom)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ATOM") {
            Ok(RecordKind::Atom)
        } else if s.eq_ignore_ascii_case("HETATM") {
            Ok(RecordKind::Hetatm)
        } else {
            Err(format!("Invalid record kind: {}", s))
        }
    }
}
