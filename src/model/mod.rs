//! Core data structures modeling predicted macromolecular complexes.
//!
//! The hierarchy is a strictly owned tree: a [`structure::Structure`] owns its models, a model
//! owns its chains, a chain owns its residues, and a residue owns its atoms. Nothing points
//! back up the tree, so conversions walk top-down and build fresh copies.

pub mod atom;
pub mod chain;
pub mod residue;
pub mod structure;
pub mod types;
