//! Multi-model structure container.
//!
//! A [`Structure`] holds one or more [`Model`]s (NMR ensembles, predicted samples, or a
//! single crystallographic model), and each model owns its chains in source order. Chain
//! order matters: the identifier budget keeps chains on a first-come basis.

use super::atom::Atom;
use super::chain::Chain;
use std::fmt;

/// One coordinate set of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Model serial number (`pdbx_PDB_model_num` in mmCIF, `MODEL` in PDB).
    pub serial: u32,
    chains: Vec<Chain>,
}

impl Model {
    pub fn new(serial: u32) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    /// Appends a chain, asserting unique chain IDs in debug builds.
    pub fn add_chain(&mut self, chain: Chain) {
        debug_assert!(
            self.chain(&chain.id).is_none(),
            "Attempted to add a duplicate chain ID '{}' to model {}",
            chain.id,
            self.serial
        );
        self.chains.push(chain);
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn chain_mut(&mut self, id: &str) -> Option<&mut Chain> {
        self.chains.iter_mut().find(|c| c.id == id)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residue_count()).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(|c| c.atom_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter_chains(&self) -> std::slice::Iter<'_, Chain> {
        self.chains.iter()
    }
}

/// Parsed structure: a name plus an ordered list of models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// Identifier taken from the source `data_` block; empty when absent.
    pub name: String,
    models: Vec<Model>,
}

impl Structure {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            models: Vec::new(),
        }
    }

    /// Appends a model, asserting unique serial numbers in debug builds.
    pub fn add_model(&mut self, model: Model) {
        debug_assert!(
            self.model(model.serial).is_none(),
            "Attempted to add a duplicate model serial '{}'",
            model.serial
        );
        self.models.push(model);
    }

    pub fn model(&self, serial: u32) -> Option<&Model> {
        self.models.iter().find(|m| m.serial == serial)
    }

    pub fn model_mut(&mut self, serial: u32) -> Option<&mut Model> {
        self.models.iter_mut().find(|m| m.serial == serial)
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn chain_count(&self) -> usize {
        self.models.iter().map(|m| m.chain_count()).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.models.iter().map(|m| m.atom_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter_models(&self) -> std::slice::Iter<'_, Model> {
        self.models.iter()
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.models
            .iter()
            .flat_map(|m| m.iter_chains())
            .flat_map(|c| c.iter_atoms())
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Structure {{ name: \"{}\", models: {}, chains: {}, atoms: {} }}",
            self.name,
            self.model_count(),
            self.chain_count(),
            self.atom_count()
        )
    }
}
