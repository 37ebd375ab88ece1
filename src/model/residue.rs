use super::atom::Atom;
use super::types::RecordKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub id: i32,
    pub insertion_code: Option<char>,
    pub name: String,
    pub kind: RecordKind,
    atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(id: i32, insertion_code: Option<char>, name: &str, kind: RecordKind) -> Self {
        Self {
            id,
            insertion_code,
            name: name.to_string(),
            kind,
            atoms: Vec::new(),
        }
    }

    /// Appends an atom. Alternate conformers share a name, so duplicates are allowed.
    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter_atoms(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Residue {{ id: {}{}, name: \"{}\", kind: {}, atoms: {} }}",
            self.id,
            self.insertion_code.map(String::from).unwrap_or_default(),
            self.name,
            self.kind,
            self.atom_count()
        )
    }
}
