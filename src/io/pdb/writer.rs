//! Legacy PDB writer.
//!
//! Emits fixed-column `ATOM`/`HETATM` records with renumbered serials, a `TER` after the last
//! polymer residue of every chain, `MODEL`/`ENDMDL` framing when more than one model is
//! present, and a closing `END`. The format reserves a single column for the chain
//! identifier, so wider identifiers are rejected before anything is written.

use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    chain::Chain,
    residue::Residue,
    structure::{Model, Structure},
};
use std::io::Write;

const FORMAT: &str = "PDB";

/// Serializes a structure into PDB records.
///
/// # Errors
///
/// Returns [`Error::InconsistentData`] when a chain identifier is not exactly one
/// character, and [`Error::Io`] when the underlying writer fails.
pub fn write_structure<W: Write>(writer: W, structure: &Structure) -> Result<(), Error> {
    validate_chain_ids(structure)?;

    let mut ctx = WriterContext::new(writer);
    let framed = structure.model_count() > 1;

    for model in structure.iter_models() {
        if framed {
            ctx.write_model_start(model)?;
        }
        ctx.write_model(model)?;
        if framed {
            ctx.write_model_end()?;
        }
    }

    ctx.write_end()
}

fn validate_chain_ids(structure: &Structure) -> Result<(), Error> {
    for model in structure.iter_models() {
        if let Some(chain) = model.iter_chains().find(|c| c.id.chars().count() != 1) {
            return Err(Error::inconsistent_data(
                FORMAT,
                None,
                format!(
                    "chain identifier '{}' in model {} does not fit the single-character chain column",
                    chain.id, model.serial
                ),
            ));
        }
    }
    Ok(())
}

struct WriterContext<W> {
    writer: W,
    current_serial: usize,
}

impl<W: Write> WriterContext<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            current_serial: 1,
        }
    }

    fn write_model_start(&mut self, model: &Model) -> Result<(), Error> {
        writeln!(self.writer, "MODEL     {:>4}", model.serial).map_err(|e| Error::from_io(e, None))
    }

    fn write_model_end(&mut self) -> Result<(), Error> {
        writeln!(self.writer, "ENDMDL").map_err(|e| Error::from_io(e, None))
    }

    fn write_model(&mut self, model: &Model) -> Result<(), Error> {
        self.current_serial = 1;

        for chain in model.iter_chains() {
            let chain_id = chain_column(chain);

            for residue in chain.iter_residues() {
                for atom in residue.iter_atoms() {
                    let serial = self.current_serial;
                    self.write_atom_record(serial, atom, residue, chain_id)?;
                    self.current_serial += 1;
                }
            }

            if let Some(last_polymer) = chain
                .iter_residues()
                .rev()
                .find(|res| res.kind.is_polymer() && !res.is_empty())
            {
                let serial = self.current_serial;
                self.write_ter_record(serial, last_polymer, chain_id)?;
                self.current_serial += 1;
            }
        }
        Ok(())
    }

    fn write_atom_record(
        &mut self,
        serial: usize,
        atom: &Atom,
        residue: &Residue,
        chain_id: char,
    ) -> Result<(), Error> {
        let record_type = if residue.kind.is_polymer() {
            "ATOM  "
        } else {
            "HETATM"
        };

        writeln!(
            self.writer,
            "{:6}{:5} {:4}{:1}{:>3} {:1}{:4}{:1}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:>2}{:2}",
            record_type,
            serial % 100000,
            atom_name_column(atom),
            atom.alt_loc.unwrap_or(' '),
            residue_name_column(residue),
            chain_id,
            residue.id % 10000,
            residue.insertion_code.unwrap_or(' '),
            atom.pos.x,
            atom.pos.y,
            atom.pos.z,
            atom.occupancy,
            atom.b_factor,
            atom.element.to_uppercase(),
            charge_column(atom.formal_charge)
        )
        .map_err(|e| Error::from_io(e, None))
    }

    fn write_ter_record(
        &mut self,
        serial: usize,
        residue: &Residue,
        chain_id: char,
    ) -> Result<(), Error> {
        writeln!(
            self.writer,
            "TER   {:5}      {:>3} {:1}{:4}{:1}",
            serial % 100000,
            residue_name_column(residue),
            chain_id,
            residue.id % 10000,
            residue.insertion_code.unwrap_or(' ')
        )
        .map_err(|e| Error::from_io(e, None))
    }

    fn write_end(&mut self) -> Result<(), Error> {
        writeln!(self.writer, "END").map_err(|e| Error::from_io(e, None))?;
        self.writer.flush().map_err(|e| Error::from_io(e, None))
    }
}

fn chain_column(chain: &Chain) -> char {
    chain.id.chars().next().unwrap_or(' ')
}

/// Atom names shorter than four characters start in column 14 unless the element symbol
/// has two letters, in which case the name is left-aligned at column 13.
fn atom_name_column(atom: &Atom) -> String {
    if atom.name.len() >= 4 {
        atom.name.chars().take(4).collect()
    } else if atom.element.len() == 2 {
        format!("{:<4}", atom.name)
    } else {
        format!(" {:<3}", atom.name)
    }
}

fn residue_name_column(residue: &Residue) -> &str {
    residue.name.get(0..3).unwrap_or(&residue.name)
}

fn charge_column(charge: Option<i8>) -> String {
    match charge {
        Some(c) if c > 0 => format!("{}+", c),
        Some(c) if c < 0 => format!("{}-", c.unsigned_abs()),
        _ => String::new(),
    }
}
