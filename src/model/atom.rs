//! Atom record carrying every field a coordinate file stores for a single site.
//!
//! Readers populate the record verbatim and writers render it back; nothing in between edits
//! an atom, so the struct exposes its fields directly and only offers a convenience
//! constructor plus builder-style setters for the optional columns.

use super::types::Point;
use smol_str::SmolStr;
use std::fmt;

/// Labeled atom with crystallographic metadata.
///
/// `element` keeps the symbol text exactly as read (e.g. `C`, `FE`, `Se`) instead of
/// normalizing it through a periodic table lookup, so unusual symbols survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from the source file; writers renumber on output.
    pub serial: u32,
    /// Atom name such as `CA` or `OXT`.
    pub name: SmolStr,
    /// Alternate location indicator, if the site is disordered.
    pub alt_loc: Option<char>,
    /// Element symbol as it appeared in the source.
    pub element: SmolStr,
    /// Cartesian coordinates in ångströms.
    pub pos: Point,
    pub occupancy: f64,
    /// Isotropic temperature factor (B-factor, or pLDDT for predicted models).
    pub b_factor: f64,
    pub formal_charge: Option<i8>,
}

impl Atom {
    /// Creates an atom with full occupancy, a zero temperature factor, and no alt loc or
    /// charge.
    ///
    /// # Arguments
    ///
    /// * `serial` - Serial number carried over from the source file.
    /// * `name` - Atom label such as `"CA"`.
    /// * `element` - Element symbol text.
    /// * `pos` - Cartesian coordinates in ångströms.
    pub fn new(serial: u32, name: &str, element: &str, pos: Point) -> Self {
        Self {
            serial,
            name: SmolStr::new(name),
            alt_loc: None,
            element: SmolStr::new(element),
            pos,
            occupancy: 1.0,
            b_factor: 0.0,
            formal_charge: None,
        }
    }

    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn with_b_factor(mut self, b_factor: f64) -> Self {
        self.b_factor = b_factor;
        self
    }

    pub fn with_alt_loc(mut self, alt_loc: Option<char>) -> Self {
        self.alt_loc = alt_loc;
        self
    }

    pub fn with_formal_charge(mut self, formal_charge: Option<i8>) -> Self {
        self.formal_charge = formal_charge;
        self
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ serial: {}, name: \"{}\", element: {}, pos: [{:.3}, {:.3}, {:.3}] }}",
            self.serial, self.name, self.element, self.pos.x, self.pos.y, self.pos.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_new_uses_neutral_defaults() {
        let pos = Point::new(1.0, 2.0, 3.0);
        let atom = Atom::new(7, "CA", "C", pos);

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, "C");
        assert_eq!(atom.pos, pos);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.b_factor, 0.0);
        assert!(atom.alt_loc.is_none());
        assert!(atom.formal_charge.is_none());
    }

    #[test]
    fn builder_setters_fill_optional_columns() {
        let atom = Atom::new(1, "FE", "FE", Point::origin())
            .with_occupancy(0.5)
            .with_b_factor(87.25)
            .with_alt_loc(Some('B'))
            .with_formal_charge(Some(2));

        assert_eq!(atom.occupancy, 0.5);
        assert_eq!(atom.b_factor, 87.25);
        assert_eq!(atom.alt_loc, Some('B'));
        assert_eq!(atom.formal_charge, Some(2));
    }

    #[test]
    fn atom_display_formats_correctly() {
        let atom = Atom::new(12, "CA", "C", Point::new(1.234, -5.678, 9.012));

        let display = format!("{}", atom);
        let expected =
            "Atom { serial: 12, name: \"CA\", element: C, pos: [1.234, -5.678, 9.012] }";

        assert_eq!(display, expected);
    }

    #[test]
    fn atom_clone_creates_identical_copy() {
        let atom = Atom::new(3, "OG", "O", Point::new(7.89, -1.23, 4.56)).with_b_factor(91.0);
        let cloned = atom.clone();

        assert_eq!(atom, cloned);
    }
}
