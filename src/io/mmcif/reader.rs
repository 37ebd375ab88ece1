//! mmCIF coordinate reader.
//!
//! Only the `_atom_site` loop is interpreted; every other category is skipped, including
//! semicolon-delimited text fields. Atoms are grouped into models, chains, and residues in
//! the order they are first encountered, and every per-atom column is carried verbatim:
//! alternate locations are kept side by side rather than filtered by occupancy.

use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    chain::Chain,
    residue::Residue,
    structure::{Model, Structure},
    types::{Point, RecordKind},
};
use std::io::BufRead;
use std::str::FromStr;

const FORMAT: &str = "mmCIF";

#[derive(Default)]
struct AtomSiteIndices {
    group_pdb: Option<usize>,
    id: Option<usize>,
    type_symbol: Option<usize>,
    auth_atom_id: Option<usize>,
    label_atom_id: Option<usize>,
    label_alt_id: Option<usize>,
    auth_comp_id: Option<usize>,
    label_comp_id: Option<usize>,
    auth_asym_id: Option<usize>,
    label_asym_id: Option<usize>,
    auth_seq_id: Option<usize>,
    label_seq_id: Option<usize>,
    pdbx_pdb_ins_code: Option<usize>,
    cartn_x: Option<usize>,
    cartn_y: Option<usize>,
    cartn_z: Option<usize>,
    occupancy: Option<usize>,
    b_iso: Option<usize>,
    formal_charge: Option<usize>,
    model_num: Option<usize>,
}

/// Column positions that every atom row must provide.
struct RequiredColumns {
    atom_name: usize,
    res_name: usize,
    chain_id: usize,
    seq_id: usize,
    x: usize,
    y: usize,
    z: usize,
}

enum ParserState {
    Base,
    InLoopHeader,
    InAtomSiteLoop,
    InOtherLoop,
}

/// One fully decoded `_atom_site` row.
struct AtomSite {
    model: u32,
    chain_id: String,
    res_seq: i32,
    i_code: Option<char>,
    res_name: String,
    kind: RecordKind,
    atom: Atom,
}

struct ModelBuffer {
    serial: u32,
    chains: Vec<Chain>,
}

/// Accumulates rows into the owned hierarchy while preserving first-encounter order.
#[derive(Default)]
struct StructureBuilder {
    models: Vec<ModelBuffer>,
}

impl StructureBuilder {
    fn push(&mut self, site: AtomSite) {
        let model_idx = match self.models.iter().position(|m| m.serial == site.model) {
            Some(idx) => idx,
            None => {
                self.models.push(ModelBuffer {
                    serial: site.model,
                    chains: Vec::new(),
                });
                self.models.len() - 1
            }
        };
        let chains = &mut self.models[model_idx].chains;

        let chain_idx = match chains.iter().rposition(|c| c.id == site.chain_id) {
            Some(idx) => idx,
            None => {
                chains.push(Chain::new(&site.chain_id));
                chains.len() - 1
            }
        };
        let chain = &mut chains[chain_idx];

        let continues_residue = chain.residues().last().is_some_and(|last| {
            last.id == site.res_seq
                && last.insertion_code == site.i_code
                && last.name == site.res_name
        });
        if !continues_residue {
            chain.add_residue(Residue::new(
                site.res_seq,
                site.i_code,
                &site.res_name,
                site.kind,
            ));
        }

        if let Some(residue) = chain.last_residue_mut() {
            residue.add_atom(site.atom);
        }
    }

    fn finish(self, name: &str) -> Structure {
        let mut structure = Structure::new(name);
        for buffer in self.models {
            let mut model = Model::new(buffer.serial);
            for chain in buffer.chains {
                model.add_chain(chain);
            }
            structure.add_model(model);
        }
        structure
    }
}

/// Parses an mmCIF stream into a [`Structure`].
///
/// # Errors
///
/// Returns [`Error::Parse`] when the stream has no `data_` block, when the `_atom_site`
/// loop lacks a required column, or when a row is truncated or carries a malformed number.
/// Stream failures surface as [`Error::Io`].
pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    let mut builder = StructureBuilder::default();
    let mut data_name: Option<String> = None;

    let mut state = ParserState::Base;
    let mut columns: Option<RequiredColumns> = None;
    let mut atom_indices = AtomSiteIndices::default();
    let mut current_loop_headers = Vec::new();
    let mut in_text_field = false;
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if line.starts_with(';') {
            in_text_field = !in_text_field;
            continue;
        }
        if in_text_field {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = trimmed.strip_prefix("data_") {
            data_name.get_or_insert_with(|| name.to_string());
            state = ParserState::Base;
            continue;
        }

        let tokens = tokenize_mmcif_line(trimmed);
        if tokens.is_empty() {
            continue;
        }

        if tokens[0] == "loop_" {
            state = ParserState::InLoopHeader;
            current_loop_headers.clear();
            continue;
        }

        match state {
            ParserState::Base => {}
            ParserState::InLoopHeader => {
                if tokens[0].starts_with('_') {
                    current_loop_headers.push(tokens[0].clone());
                } else if current_loop_headers
                    .iter()
                    .any(|h| h.starts_with("_atom_site."))
                {
                    state = ParserState::InAtomSiteLoop;
                    atom_indices = map_atom_site_indices(&current_loop_headers);
                    let required = required_columns(&atom_indices, line_num)?;
                    builder.push(parse_atom_row(&tokens, &atom_indices, &required, line_num)?);
                    columns = Some(required);
                } else {
                    state = ParserState::InOtherLoop;
                }
            }
            ParserState::InAtomSiteLoop => {
                if tokens[0].starts_with('_') {
                    state = ParserState::Base;
                } else if let Some(required) = &columns {
                    builder.push(parse_atom_row(&tokens, &atom_indices, required, line_num)?);
                }
            }
            ParserState::InOtherLoop => {
                if tokens[0].starts_with('_') {
                    state = ParserState::Base;
                }
            }
        }
    }

    let Some(name) = data_name else {
        return Err(Error::parse(
            FORMAT,
            None,
            line_num,
            "stream does not contain a data_ block",
        ));
    };

    Ok(builder.finish(&name))
}

fn tokenize_mmcif_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = None;

    for c in line.chars() {
        match in_quote {
            Some(q) => {
                if c == q {
                    in_quote = None;
                } else {
                    current.push(c);
                }
            }
            None => {
                if c.is_whitespace() {
                    if !current.is_empty() {
                        tokens.push(current.clone());
                        current.clear();
                    }
                } else if c == '\'' || c == '"' {
                    if !current.is_empty() {
                        current.push(c);
                    } else {
                        in_quote = Some(c);
                    }
                } else {
                    current.push(c);
                }
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn map_atom_site_indices(headers: &[String]) -> AtomSiteIndices {
    let mut indices = AtomSiteIndices::default();
    for (i, header) in headers.iter().enumerate() {
        match header.as_str() {
            "_atom_site.group_PDB" => indices.group_pdb = Some(i),
            "_atom_site.id" => indices.id = Some(i),
            "_atom_site.type_symbol" => indices.type_symbol = Some(i),
            "_atom_site.auth_atom_id" => indices.auth_atom_id = Some(i),
            "_atom_site.label_atom_id" => indices.label_atom_id = Some(i),
            "_atom_site.label_alt_id" => indices.label_alt_id = Some(i),
            "_atom_site.auth_comp_id" => indices.auth_comp_id = Some(i),
            "_atom_site.label_comp_id" => indices.label_comp_id = Some(i),
            "_atom_site.auth_asym_id" => indices.auth_asym_id = Some(i),
            "_atom_site.label_asym_id" => indices.label_asym_id = Some(i),
            "_atom_site.auth_seq_id" => indices.auth_seq_id = Some(i),
            "_atom_site.label_seq_id" => indices.label_seq_id = Some(i),
            "_atom_site.pdbx_PDB_ins_code" => indices.pdbx_pdb_ins_code = Some(i),
            "_atom_site.Cartn_x" => indices.cartn_x = Some(i),
            "_atom_site.Cartn_y" => indices.cartn_y = Some(i),
            "_atom_site.Cartn_z" => indices.cartn_z = Some(i),
            "_atom_site.occupancy" => indices.occupancy = Some(i),
            "_atom_site.B_iso_or_equiv" => indices.b_iso = Some(i),
            "_atom_site.pdbx_formal_charge" => indices.formal_charge = Some(i),
            "_atom_site.pdbx_PDB_model_num" => indices.model_num = Some(i),
            _ => {}
        }
    }
    indices
}

fn required_columns(indices: &AtomSiteIndices, line_num: usize) -> Result<RequiredColumns, Error> {
    let require = |idx: Option<usize>, what: &str| {
        idx.ok_or_else(|| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("_atom_site loop is missing {what}"),
            )
        })
    };

    Ok(RequiredColumns {
        atom_name: require(
            indices.auth_atom_id.or(indices.label_atom_id),
            "atom identifier columns",
        )?,
        res_name: require(
            indices.auth_comp_id.or(indices.label_comp_id),
            "residue identifier columns",
        )?,
        chain_id: require(
            indices.auth_asym_id.or(indices.label_asym_id),
            "chain identifier columns",
        )?,
        seq_id: require(
            indices.auth_seq_id.or(indices.label_seq_id),
            "residue sequence columns",
        )?,
        x: require(indices.cartn_x, "the _atom_site.Cartn_x column")?,
        y: require(indices.cartn_y, "the _atom_site.Cartn_y column")?,
        z: require(indices.cartn_z, "the _atom_site.Cartn_z column")?,
    })
}

fn token<'a>(tokens: &'a [String], idx: usize, line_num: usize) -> Result<&'a str, Error> {
    tokens.get(idx).map(|s| s.as_str()).ok_or_else(|| {
        Error::parse(
            FORMAT,
            None,
            line_num,
            "Atom record is shorter than declared _atom_site headers",
        )
    })
}

/// Looks up an optional column, mapping the CIF placeholders `.` and `?` to `None`.
fn optional_token<'a>(
    tokens: &'a [String],
    idx: Option<usize>,
    line_num: usize,
) -> Result<Option<&'a str>, Error> {
    match idx {
        Some(idx) => token(tokens, idx, line_num).map(|value| {
            if is_placeholder(value) {
                None
            } else {
                Some(value)
            }
        }),
        None => Ok(None),
    }
}

fn is_placeholder(value: &str) -> bool {
    matches!(value, "." | "?")
}

fn parse_number<T: FromStr>(value: &str, what: &str, line_num: usize) -> Result<T, Error> {
    T::from_str(value).map_err(|_| {
        Error::parse(
            FORMAT,
            None,
            line_num,
            format!("Invalid {what} '{value}'"),
        )
    })
}

fn parse_atom_row(
    tokens: &[String],
    indices: &AtomSiteIndices,
    required: &RequiredColumns,
    line_num: usize,
) -> Result<AtomSite, Error> {
    let atom_name = token(tokens, required.atom_name, line_num)?;
    let res_name = token(tokens, required.res_name, line_num)?;
    let chain_id_raw = token(tokens, required.chain_id, line_num)?;
    let seq_id_str = token(tokens, required.seq_id, line_num)?;
    let x_str = token(tokens, required.x, line_num)?;
    let y_str = token(tokens, required.y, line_num)?;
    let z_str = token(tokens, required.z, line_num)?;

    let pos = Point::new(
        parse_number(x_str, "X coordinate", line_num)?,
        parse_number(y_str, "Y coordinate", line_num)?,
        parse_number(z_str, "Z coordinate", line_num)?,
    );

    let kind = match optional_token(tokens, indices.group_pdb, line_num)? {
        Some(group) if group.eq_ignore_ascii_case("HETATM") => RecordKind::Hetatm,
        _ => RecordKind::Atom,
    };

    let res_seq = if is_placeholder(seq_id_str) {
        1
    } else {
        parse_number(seq_id_str, "residue sequence number", line_num)?
    };

    let i_code = optional_token(tokens, indices.pdbx_pdb_ins_code, line_num)?
        .and_then(|code| code.chars().next());
    let alt_loc = optional_token(tokens, indices.label_alt_id, line_num)?
        .and_then(|code| code.chars().next());

    let model = match optional_token(tokens, indices.model_num, line_num)? {
        Some(num) => parse_number(num, "model number", line_num)?,
        None => 1,
    };

    let serial = optional_token(tokens, indices.id, line_num)?
        .and_then(|id| id.parse::<u32>().ok())
        .unwrap_or(0);

    let occupancy = match optional_token(tokens, indices.occupancy, line_num)? {
        Some(occ) => parse_number(occ, "occupancy", line_num)?,
        None => 1.0,
    };
    let b_factor = match optional_token(tokens, indices.b_iso, line_num)? {
        Some(b) => parse_number(b, "temperature factor", line_num)?,
        None => 0.0,
    };
    let formal_charge = optional_token(tokens, indices.formal_charge, line_num)?
        .and_then(|charge| charge.parse::<i8>().ok());

    let element = optional_token(tokens, indices.type_symbol, line_num)?.unwrap_or("");

    let chain_id = if is_placeholder(chain_id_raw) {
        "?".to_string()
    } else {
        chain_id_raw.to_string()
    };

    let atom = Atom::new(serial, atom_name, element, pos)
        .with_alt_loc(alt_loc)
        .with_occupancy(occupancy)
        .with_b_factor(b_factor)
        .with_formal_charge(formal_charge);

    Ok(AtomSite {
        model,
        chain_id,
        res_seq,
        i_code,
        res_name: res_name.to_string(),
        kind,
        atom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "\
data_fold_test
#
_entry.id fold_test
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_alt_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.pdbx_PDB_ins_code
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
_atom_site.B_iso_or_equiv
_atom_site.auth_seq_id
_atom_site.auth_asym_id
_atom_site.pdbx_PDB_model_num
";

    fn parse(body: &str) -> Result<Structure, Error> {
        read(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn reads_chains_residues_and_atoms_in_source_order() {
        let body = "\
ATOM 1 N N . MET A 1 ? 1.000 2.000 3.000 1.00 91.50 1 B 1
ATOM 2 C CA . MET A 1 ? 1.500 2.500 3.500 1.00 92.00 1 B 1
ATOM 3 N N . GLY A 2 ? 4.000 5.000 6.000 1.00 88.00 2 B 1
ATOM 4 N N . SER B 1 ? 7.000 8.000 9.000 1.00 75.25 1 A 1
#
";
        let structure = parse(body).expect("valid mmCIF");

        assert_eq!(structure.name, "fold_test");
        assert_eq!(structure.model_count(), 1);
        let model = &structure.models()[0];
        let ids: Vec<_> = model.iter_chains().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);

        let chain_b = model.chain("B").expect("chain B");
        assert_eq!(chain_b.residue_count(), 2);
        assert_eq!(chain_b.residues()[0].name, "MET");
        assert_eq!(chain_b.residues()[0].atom_count(), 2);

        let ca = &chain_b.residues()[0].atoms()[1];
        assert_eq!(ca.serial, 2);
        assert_eq!(ca.name, "CA");
        assert_eq!(ca.element, "C");
        assert_eq!(ca.pos, Point::new(1.5, 2.5, 3.5));
        assert_eq!(ca.b_factor, 92.0);
    }

    #[test]
    fn keeps_alternate_locations_and_occupancies() {
        let body = "\
ATOM 1 C CB A LEU A 5 ? 0.0 0.0 0.0 0.60 20.0 5 A 1
ATOM 2 C CB B LEU A 5 ? 0.1 0.0 0.0 0.40 21.0 5 A 1
";
        let structure = parse(body).expect("valid mmCIF");
        let residue = &structure.models()[0].chains()[0].residues()[0];

        assert_eq!(residue.atom_count(), 2);
        assert_eq!(residue.atoms()[0].alt_loc, Some('A'));
        assert_eq!(residue.atoms()[0].occupancy, 0.60);
        assert_eq!(residue.atoms()[1].alt_loc, Some('B'));
        assert_eq!(residue.atoms()[1].occupancy, 0.40);
    }

    #[test]
    fn groups_rows_by_model_number() {
        let body = "\
ATOM 1 N N . ALA A 1 ? 0.0 0.0 0.0 1.0 50.0 1 A 1
ATOM 2 N N . ALA A 1 ? 1.0 0.0 0.0 1.0 50.0 1 A 2
ATOM 3 N N . ALA B 1 ? 2.0 0.0 0.0 1.0 50.0 1 B 2
";
        let structure = parse(body).expect("valid mmCIF");

        assert_eq!(structure.model_count(), 2);
        assert_eq!(structure.model(1).map(|m| m.chain_count()), Some(1));
        assert_eq!(structure.model(2).map(|m| m.chain_count()), Some(2));
    }

    #[test]
    fn hetatm_rows_produce_hetatm_residues() {
        let body = "\
HETATM 1 MG MG . MG C . ? 3.0 3.0 3.0 1.0 30.0 101 C 1
";
        let structure = parse(body).expect("valid mmCIF");
        let residue = &structure.models()[0].chains()[0].residues()[0];

        assert_eq!(residue.kind, RecordKind::Hetatm);
        assert_eq!(residue.id, 101);
        assert_eq!(residue.atoms()[0].element, "MG");
    }

    #[test]
    fn multi_character_chain_ids_are_kept() {
        let body = "\
ATOM 1 N N . ALA AA 1 ? 0.0 0.0 0.0 1.0 50.0 1 AA 1
";
        let structure = parse(body).expect("valid mmCIF");

        assert_eq!(structure.models()[0].chains()[0].id, "AA");
    }

    #[test]
    fn skips_other_loops_and_text_fields() {
        let input = "\
data_with_text
_struct.title
;
A title with _atom_site.fake tokens
loop_
;
loop_
_chem_comp.id
_chem_comp.type
ALA 'L-peptide linking'
loop_
_atom_site.group_PDB
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.auth_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
ATOM \"C1'\" A A 1 0.0 0.0 0.0
_some.trailing value
";
        let structure = read(Cursor::new(input)).expect("valid mmCIF");

        assert_eq!(structure.name, "with_text");
        assert_eq!(structure.atom_count(), 1);
        let atom = structure.iter_atoms().next().expect("one atom");
        assert_eq!(atom.name, "C1'");
    }

    #[test]
    fn data_block_without_atoms_yields_empty_structure() {
        let structure = read(Cursor::new("data_empty\n_entry.id empty\n")).expect("valid");

        assert!(structure.is_empty());
        assert_eq!(structure.name, "empty");
    }

    #[test]
    fn missing_data_block_is_a_parse_error() {
        let err = read(Cursor::new("this is not a cif file\n")).expect_err("should fail");

        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn truncated_row_is_a_parse_error() {
        let err = parse("ATOM 1 N N . MET A 1 ? 1.0 2.0\n").expect_err("should fail");

        match err {
            Error::Parse { details, .. } => assert!(details.contains("shorter")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_coordinate_is_a_parse_error() {
        let err = parse("ATOM 1 N N . MET A 1 ? abc 2.0 3.0 1.0 1.0 1 A 1\n")
            .expect_err("should fail");

        match err {
            Error::Parse { details, .. } => assert!(details.contains("X coordinate")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn atom_site_without_coordinates_is_rejected() {
        let input = "\
data_bad
loop_
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.auth_asym_id
_atom_site.auth_seq_id
N ALA A 1
";
        let err = read(Cursor::new(input)).expect_err("should fail");

        match err {
            Error::Parse { details, .. } => assert!(details.contains("Cartn_x")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn tokenizer_handles_quoted_values_with_inner_quotes() {
        let tokens = tokenize_mmcif_line("ATOM \"O5'\" 'two words' plain");

        assert_eq!(tokens, ["ATOM", "O5'", "two words", "plain"]);
    }
}
