use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    record::{DataItem, Record},
    table::{Bond, ConnectionTable},
    types::{BondOrder, BondStereo, Parity, charge_from_ctfile},
};
use std::io::BufRead;
use tracing::trace;

const TERMINATOR: &str = "$$$$";

/// Streams records out of a multi-record SD file.
///
/// Records are split on `$$$$` lines. A final block without a terminator is
/// still returned when it has content.
pub struct Records<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            done: false,
        }
    }

    fn next_block(&mut self) -> Result<Option<Vec<(usize, String)>>, Error> {
        let mut block = Vec::new();
        loop {
            let Some(line) = self.lines.next() else {
                self.done = true;
                break;
            };
            let content = line.map_err(|e| Error::Io { source: e })?;
            self.line_no += 1;

            if content.trim() == TERMINATOR {
                if block_has_content(&block) {
                    return Ok(Some(block));
                }
                block.clear();
                continue;
            }
            block.push((self.line_no, content));
        }

        if block_has_content(&block) {
            Ok(Some(block))
        } else {
            Ok(None)
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_block() {
            Ok(Some(lines)) => Some(parse_block(&lines)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads every record of an SD stream, in file order.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Record>, Error> {
    Records::new(reader).collect()
}

fn block_has_content(lines: &[(usize, String)]) -> bool {
    lines.iter().any(|(_, l)| !l.trim().is_empty())
}

fn parse_block(lines: &[(usize, String)]) -> Result<Record, Error> {
    let first_line = lines.first().map(|(ln, _)| *ln).unwrap_or(1);
    if lines.len() < 4 {
        return Err(Error::parse(
            first_line,
            "SD record must contain a three-line header and a counts line",
        ));
    }

    let (counts_line_no, counts_line) = (&lines[3].0, lines[3].1.as_str());
    if counts_line.contains("V3000") {
        return Err(Error::UnsupportedVersion {
            line: *counts_line_no,
            version: "V3000".to_string(),
        });
    }

    let (atom_count, bond_count) = parse_counts(counts_line, *counts_line_no)?;
    let atom_start = 4;
    let bond_start = atom_start + atom_count;
    let props_start = bond_start + bond_count;

    if lines.len() < props_start {
        return Err(Error::parse(
            lines.last().map(|(ln, _)| *ln).unwrap_or(*counts_line_no),
            "SD record ended before atoms/bonds were fully specified",
        ));
    }

    let mut atoms = parse_atoms(&lines[atom_start..bond_start])?;
    let bonds = parse_bonds(&lines[bond_start..props_start], atom_count)?;

    let end_idx = lines[props_start..]
        .iter()
        .position(|(_, l)| l.starts_with("M  END"))
        .map(|offset| props_start + offset);
    let props = match end_idx {
        Some(idx) => &lines[props_start..idx],
        None => &lines[props_start..],
    };
    apply_charge_properties(props, &mut atoms)?;

    let data = match end_idx {
        Some(idx) => parse_data_items(&lines[idx + 1..]),
        None => Vec::new(),
    };

    let mut block = String::new();
    for (_, line) in lines {
        block.push_str(line);
        block.push('\n');
    }

    let record = Record::new(block, ConnectionTable { atoms, bonds }, data);
    trace!(
        title = record.title(),
        atoms = atom_count,
        bonds = bond_count,
        line = first_line,
        "parsed SD record"
    );
    Ok(record)
}

/// Returns the trimmed fixed-width field `[start, end)` of a CTfile line.
///
/// Short lines yield an empty field; non-ASCII content that would split a
/// character yields `None`.
fn field(line: &str, start: usize, end: usize) -> Option<&str> {
    let end = end.min(line.len());
    if start >= end {
        return Some("");
    }
    line.get(start..end).map(str::trim)
}

fn parse_code(raw: &str, line: usize, start: usize, end: usize, what: &str) -> Result<u8, Error> {
    let token = field(raw, start, end)
        .ok_or_else(|| Error::parse(line, format!("malformed {what} column")))?;
    if token.is_empty() {
        return Ok(0);
    }
    token
        .parse::<u8>()
        .map_err(|_| Error::parse(line, format!("invalid {what} value '{token}'")))
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let fixed = field(line, 0, 3)
        .zip(field(line, 3, 6))
        .and_then(|(a, b)| Some((a.parse::<usize>().ok()?, b.parse::<usize>().ok()?)));
    if let Some(counts) = fixed {
        return Ok(counts);
    }

    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(Error::parse(
            line_no,
            "counts line must contain atom and bond counts",
        ));
    }
    let atoms = tokens[0]
        .parse::<usize>()
        .map_err(|_| Error::parse(line_no, "invalid atom count"))?;
    let bonds = tokens[1]
        .parse::<usize>()
        .map_err(|_| Error::parse(line_no, "invalid bond count"))?;
    Ok((atoms, bonds))
}

fn parse_atoms(lines: &[(usize, String)]) -> Result<Vec<Atom>, Error> {
    let mut atoms = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let coord = |start: usize, axis: &str| -> Result<f64, Error> {
            field(raw, start, start + 10)
                .and_then(|t| t.parse::<f64>().ok())
                .ok_or_else(|| {
                    Error::parse(*ln, format!("invalid {axis} coordinate in atom line"))
                })
        };
        let x = coord(0, "x")?;
        let y = coord(10, "y")?;
        let z = coord(20, "z")?;

        let symbol = field(raw, 31, 34).unwrap_or_default();
        if symbol.is_empty() {
            return Err(Error::parse(*ln, "missing element symbol in atom line"));
        }

        let charge_code = parse_code(raw, *ln, 36, 39, "charge")?;
        let charge = charge_from_ctfile(charge_code)
            .ok_or_else(|| Error::parse(*ln, "unsupported charge code in atom line"))?;
        let parity_code = parse_code(raw, *ln, 39, 42, "parity")?;
        let parity = Parity::from_ctfile(parity_code)
            .ok_or_else(|| Error::parse(*ln, "unsupported stereo parity in atom line"))?;

        atoms.push(
            Atom::new(symbol, [x, y, z])
                .with_charge(charge)
                .with_parity(parity),
        );
    }
    Ok(atoms)
}

fn parse_bonds(lines: &[(usize, String)], atom_count: usize) -> Result<Vec<Bond>, Error> {
    let mut bonds = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let index = |start: usize, what: &str| -> Result<usize, Error> {
            field(raw, start, start + 3)
                .and_then(|t| t.parse::<usize>().ok())
                .ok_or_else(|| Error::parse(*ln, format!("invalid {what} atom index")))
        };
        let a1 = index(0, "first")?;
        let a2 = index(3, "second")?;

        let order_code = parse_code(raw, *ln, 6, 9, "bond type")?;
        let order = BondOrder::from_ctfile(order_code)
            .ok_or_else(|| Error::parse(*ln, "unsupported bond order in bond line"))?;
        let stereo_code = parse_code(raw, *ln, 9, 12, "bond stereo")?;
        let stereo = BondStereo::from_ctfile(order, stereo_code)
            .ok_or_else(|| Error::parse(*ln, "unsupported bond stereo in bond line"))?;

        if a1 == 0 || a2 == 0 || a1 > atom_count || a2 > atom_count {
            return Err(Error::parse(
                *ln,
                "bond references atom outside declared range",
            ));
        }

        bonds.push(Bond::new(a1 - 1, a2 - 1, order).with_stereo(stereo));
    }
    Ok(bonds)
}

/// Applies `M  CHG` lines. Their presence supersedes every atom-block charge.
fn apply_charge_properties(lines: &[(usize, String)], atoms: &mut [Atom]) -> Result<(), Error> {
    let mut reset = false;
    for (ln, raw) in lines {
        if !raw.starts_with("M  CHG") {
            continue;
        }
        if !reset {
            atoms.iter_mut().for_each(|a| a.charge = 0);
            reset = true;
        }

        let tokens: Vec<_> = raw.split_whitespace().skip(2).collect();
        let count = tokens
            .first()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| Error::parse(*ln, "invalid entry count in M  CHG line"))?;
        if tokens.len() < 1 + 2 * count {
            return Err(Error::parse(*ln, "M  CHG line is missing atom/charge pairs"));
        }

        for pair in tokens[1..1 + 2 * count].chunks(2) {
            let atom = pair[0]
                .parse::<usize>()
                .map_err(|_| Error::parse(*ln, "invalid atom index in M  CHG line"))?;
            let charge = pair[1]
                .parse::<i8>()
                .map_err(|_| Error::parse(*ln, "invalid charge in M  CHG line"))?;
            let slot = atom
                .checked_sub(1)
                .and_then(|idx| atoms.get_mut(idx))
                .ok_or_else(|| Error::parse(*ln, "M  CHG references atom outside declared range"))?;
            slot.charge = charge;
        }
    }
    Ok(())
}

fn parse_data_items(lines: &[(usize, String)]) -> Vec<DataItem> {
    let mut items = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for (_, raw) in lines {
        if let Some((tag, values)) = current.as_mut() {
            if raw.trim().is_empty() {
                items.push(DataItem {
                    tag: std::mem::take(tag),
                    value: values.join("\n"),
                });
                current = None;
            } else {
                values.push(raw.as_str());
            }
            continue;
        }

        if raw.starts_with('>') {
            if let Some(tag) = header_tag(raw) {
                current = Some((tag.to_string(), Vec::new()));
            }
        }
    }

    if let Some((tag, values)) = current {
        items.push(DataItem {
            tag,
            value: values.join("\n"),
        });
    }
    items
}

fn header_tag(line: &str) -> Option<&str> {
    let open = line.find('<')?;
    let close = line[open + 1..].find('>')?;
    Some(&line[open + 1..open + 1 + close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ETHANOL: &str = "\
full_1
  -OEChem-01012000003D

  3  2  0     0  0  0  0  0  0999 V2000
   -1.2700    0.2480    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    0.1390   -0.3080    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.0360    0.7890    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
  2  3  1  0  0  0  0
M  END
> <SMILES>
CCO

> <Energy>
-12.5

$$$$
";

    #[test]
    fn reads_atoms_bonds_and_data_items() {
        let records = read(Cursor::new(ETHANOL)).expect("read sdf");
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.title(), "full_1");
        assert_eq!(rec.table.atom_count(), 3);
        assert_eq!(rec.table.bond_count(), 2);
        assert_eq!(rec.table.atoms[2].symbol, "O");
        assert!((rec.table.atoms[0].position[0] + 1.27).abs() < 1e-9);
        assert_eq!(rec.data_value("SMILES"), Some("CCO"));
        assert_eq!(rec.data_value("Energy"), Some("-12.5"));
    }

    #[test]
    fn block_keeps_record_text_without_terminator() {
        let records = read(Cursor::new(ETHANOL)).expect("read sdf");
        let expected = ETHANOL.strip_suffix("$$$$\n").unwrap();
        assert_eq!(records[0].block(), expected);
    }

    #[test]
    fn reads_multiple_records_and_unterminated_tail() {
        let body = ETHANOL.strip_suffix("$$$$\n").unwrap();
        let second = body.replacen("full_1", "full_2", 1);
        let input = format!("{ETHANOL}{second}");

        let records = read(Cursor::new(input)).expect("read sdf");
        let titles: Vec<_> = records.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["full_1", "full_2"]);
    }

    #[test]
    fn trailing_blank_lines_do_not_create_records() {
        let input = format!("{ETHANOL}\n\n");
        let records = read(Cursor::new(input)).expect("read sdf");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn charge_property_overrides_atom_block() {
        let input = "\
acetate
  test

  2  1  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  3  0  0  0  0  0  0  0  0  0  0
    1.2000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
M  CHG  1   2  -1
M  END
$$$$
";
        let records = read(Cursor::new(input)).expect("read sdf");
        let atoms = &records[0].table.atoms;
        assert_eq!(atoms[0].charge, 0);
        assert_eq!(atoms[1].charge, -1);
    }

    #[test]
    fn reads_parity_and_bond_stereo() {
        let input = "\
chiral
  test

  2  1  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  1  0  0  0  0  0  0  0  0  0
    1.2000    0.0000    0.0000 Cl  0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  6  0  0  0
M  END
$$$$
";
        let records = read(Cursor::new(input)).expect("read sdf");
        let table = &records[0].table;
        assert_eq!(table.atoms[0].parity, Parity::Odd);
        assert_eq!(table.atoms[1].symbol, "Cl");
        assert_eq!(table.bonds[0].stereo, BondStereo::Down);
    }

    #[test]
    fn reads_query_bond_types() {
        let input = "\
query
  test

  3  2  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.4000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.8000    0.0000    0.0000 N   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  8  0  0  0  0
  2  3  5  0  0  0  0
M  END
$$$$
";
        let records = read(Cursor::new(input)).expect("read sdf");
        let bonds = &records[0].table.bonds;
        assert_eq!(bonds[0].order, BondOrder::Query(8));
        assert_eq!(bonds[1].order, BondOrder::Query(5));
        assert_eq!(bonds[0].stereo, BondStereo::None);
    }

    #[test]
    fn rejects_v3000() {
        let input = "t\n p\n\n  0  0  0     0  0  0  0  0  0999 V3000\nM  END\n$$$$\n";
        let err = read(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { line: 4, .. }));
    }

    #[test]
    fn rejects_truncated_atom_block() {
        let input = "t\n p\n\n  3  0  0     0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 C   0  0\n$$$$\n";
        let err = read(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn rejects_bond_outside_atom_range() {
        let input = "\
t
 p

  1  1  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
M  END
$$$$
";
        let err = read(Cursor::new(input)).unwrap_err();
        match err {
            Error::Parse { line, details } => {
                assert_eq!(line, 6);
                assert!(details.contains("outside declared range"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn counts_line_without_separating_space_uses_fixed_columns() {
        assert_eq!(parse_counts("100101  0  0", 4).unwrap(), (100, 101));
        assert_eq!(parse_counts("  3  2  0", 4).unwrap(), (3, 2));
    }
}
