//! Structure-level operations applied between parsing and export.
//!
//! The chain operations rewrite chain identifiers so a structure fits the single-character
//! chain column of the legacy PDB format. They never touch residues or atoms: retained chains
//! are deep copies of the source chains under their new identifiers.

mod chains;

pub use chains::{ChainDecision, ChainIdBudget, ChainPolicy, Conversion, apply_chain_policy};
