//! Chain-identifier policies for PDB export.
//!
//! Predicted assemblies routinely exceed 26 chains or use multi-letter chain codes, neither of
//! which the PDB chain column can hold. [`ChainPolicy::Budgeted`] relabels chains `A`..`Z` in
//! source order and drops whatever does not fit; [`ChainPolicy::Unconstrained`] passes
//! identifiers through untouched and leaves width validation to the writer.

use crate::model::{
    chain::Chain,
    structure::{Model, Structure},
};

/// How chain identifiers are treated while converting a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainPolicy {
    /// Keep every chain under its original identifier.
    #[default]
    Unconstrained,
    /// Relabel chains `A`..`Z` in encounter order and drop chains once the letters run out.
    Budgeted,
}

/// Cursor over the 26 single-character chain identifiers available in one output model.
///
/// A fresh budget is created for every model; identifiers are handed out in alphabetical
/// order and each one at most once.
#[derive(Debug, Clone, Default)]
pub struct ChainIdBudget {
    consumed: usize,
}

impl ChainIdBudget {
    pub const CAPACITY: usize = 26;

    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes and returns the next identifier, or `None` once all 26 are used.
    pub fn next_id(&mut self) -> Option<char> {
        if self.consumed >= Self::CAPACITY {
            return None;
        }
        let id = char::from(b'A' + self.consumed as u8);
        self.consumed += 1;
        Some(id)
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        Self::CAPACITY - self.consumed
    }

    pub fn is_exhausted(&self) -> bool {
        self.consumed >= Self::CAPACITY
    }
}

/// Outcome for one source chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainDecision {
    /// The chain was written under `assigned` (equal to `original` when unconstrained).
    Kept {
        model: u32,
        original: String,
        assigned: String,
    },
    /// The chain did not fit in the model's identifier budget and was omitted.
    Dropped { model: u32, original: String },
}

impl ChainDecision {
    pub fn is_dropped(&self) -> bool {
        matches!(self, ChainDecision::Dropped { .. })
    }
}

/// Converted structure together with the decision taken for every source chain.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub structure: Structure,
    pub decisions: Vec<ChainDecision>,
}

impl Conversion {
    pub fn dropped(&self) -> impl Iterator<Item = &ChainDecision> {
        self.decisions.iter().filter(|d| d.is_dropped())
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped().count()
    }
}

/// Builds a new structure whose chain identifiers follow `policy`.
///
/// Models are visited in order and each gets its own [`ChainIdBudget`]. Under the budgeted
/// policy the first 26 chains of a model are kept as deep copies relabeled `A`..`Z`; later
/// chains are dropped and reported. Models that end up with no chains are still emitted.
pub fn apply_chain_policy(structure: &Structure, policy: ChainPolicy) -> Conversion {
    let mut converted = Structure::new(&structure.name);
    let mut decisions = Vec::with_capacity(structure.chain_count());

    for model in structure.iter_models() {
        let model = match policy {
            ChainPolicy::Unconstrained => pass_through_model(model, &mut decisions),
            ChainPolicy::Budgeted => relabel_model(model, &mut decisions),
        };
        converted.add_model(model);
    }

    Conversion {
        structure: converted,
        decisions,
    }
}

fn pass_through_model(model: &Model, decisions: &mut Vec<ChainDecision>) -> Model {
    decisions.extend(model.iter_chains().map(|chain| ChainDecision::Kept {
        model: model.serial,
        original: chain.id.clone(),
        assigned: chain.id.clone(),
    }));
    model.clone()
}

fn relabel_model(model: &Model, decisions: &mut Vec<ChainDecision>) -> Model {
    let mut budget = ChainIdBudget::new();
    let mut relabeled = Model::new(model.serial);

    for chain in model.iter_chains() {
        match budget.next_id() {
            Some(id) => {
                let assigned = id.to_string();
                relabeled.add_chain(copy_chain(chain, &assigned));
                decisions.push(ChainDecision::Kept {
                    model: model.serial,
                    original: chain.id.clone(),
                    assigned,
                });
            }
            None => decisions.push(ChainDecision::Dropped {
                model: model.serial,
                original: chain.id.clone(),
            }),
        }
    }

    relabeled
}

fn copy_chain(source: &Chain, id: &str) -> Chain {
    let mut chain = Chain::new(id);
    for residue in source.iter_residues() {
        chain.add_residue(residue.clone());
    }
    chain
}
