//! # FoldForge
//!
//! **FoldForge** turns batches of predicted macromolecular assemblies into something legacy
//! analysis tools can read, scores them, and collects the scores in one table. mmCIF inputs are
//! converted to fixed-column PDB files, either keeping their chain identifiers or relabeling
//! them `A`..`Z` and dropping what does not fit. The converted files are then handed to the
//! pDockQ and PRODIGY scripts and their loosely formatted output is parsed and joined with the
//! conversion manifest.
//!
//! ## Features
//!
//! - **Owned structure tree** – `Structure`, `Model`, `Chain`, `Residue`, and `Atom` with
//!   `nalgebra` coordinates and exclusive ownership at every level.
//! - **Chain identifier budget** – `ops::apply_chain_policy` relabels or drops chains per model
//!   and reports every decision.
//! - **Streaming I/O** – an `_atom_site` mmCIF reader and a PDB writer over `BufRead`/`Write`.
//! - **Tool output grammars** – `metrics::docking` and `metrics::contacts` turn captured text
//!   into typed records or precise errors.
//! - **Outer-join report** – `report::aggregate` keeps rows that any source produced and
//!   leaves missing values empty.

mod model;

pub mod io;
pub mod metrics;
pub mod ops;
pub mod pipeline;
pub mod report;
pub mod tools;

pub use model::atom::Atom;
pub use model::chain::Chain;
pub use model::residue::Residue;
pub use model::structure::{Model, Structure};
pub use model::types::{Point, RecordKind};
