use super::atom::Atom;
use super::residue::Residue;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,
    residues: Vec<Residue>,
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn add_residue(&mut self, residue: Residue) {
        self.residues.push(residue);
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn last_residue_mut(&mut self) -> Option<&mut Residue> {
        self.residues.last_mut()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atom_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn iter_residues(&self) -> std::slice::Iter<'_, Residue> {
        self.residues.iter()
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.residues.iter().flat_map(|r| r.iter_atoms())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chain {{ id: \"{}\", residues: {} }}",
            self.id,
            self.residue_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Point, RecordKind};

    fn residue_with_atoms(id: i32, name: &str, atoms: usize) -> Residue {
        let mut residue = Residue::new(id, None, name, RecordKind::Atom);
        for i in 0..atoms {
            residue.add_atom(Atom::new(i as u32 + 1, "C", "C", Point::origin()));
        }
        residue
    }

    #[test]
    fn chain_new_creates_empty_chain() {
        let chain = Chain::new("AA");

        assert_eq!(chain.id, "AA");
        assert!(chain.is_empty());
        assert_eq!(chain.atom_count(), 0);
    }

    #[test]
    fn chain_counts_residues_and_atoms() {
        let mut chain = Chain::new("A");
        chain.add_residue(residue_with_atoms(1, "ALA", 5));
        chain.add_residue(residue_with_atoms(2, "GLY", 4));

        assert_eq!(chain.residue_count(), 2);
        assert_eq!(chain.atom_count(), 9);
        assert_eq!(chain.iter_atoms().count(), 9);
    }

    #[test]
    fn chain_preserves_residue_order() {
        let mut chain = Chain::new("B");
        chain.add_residue(residue_with_atoms(10, "LYS", 1));
        chain.add_residue(residue_with_atoms(3, "ASP", 1));

        let ids: Vec<_> = chain.iter_residues().map(|r| r.id).collect();
        assert_eq!(ids, [10, 3]);
    }

    #[test]
    fn last_residue_mut_targets_most_recent_residue() {
        let mut chain = Chain::new("C");
        chain.add_residue(residue_with_atoms(1, "MET", 0));
        chain.add_residue(residue_with_atoms(2, "SER", 0));

        chain
            .last_residue_mut()
            .expect("chain has residues")
            .add_atom(Atom::new(1, "OG", "O", Point::origin()));

        assert_eq!(chain.residues()[0].atom_count(), 0);
        assert_eq!(chain.residues()[1].atom_count(), 1);
    }

    #[test]
    fn chain_display_formats_correctly() {
        let mut chain = Chain::new("A");
        chain.add_residue(residue_with_atoms(1, "ALA", 1));

        assert_eq!(chain.to_string(), "Chain { id: \"A\", residues: 1 }");
    }
}
