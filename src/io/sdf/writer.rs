use crate::io::error::Error;
use crate::model::record::Record;
use std::io::Write;

/// Writes records verbatim, each followed by a `$$$$` terminator line.
pub fn write<'a, W, I>(mut writer: W, records: I) -> Result<usize, Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut count = 0;
    for record in records {
        writer.write_all(record.block().as_bytes())?;
        writeln!(writer, "$$$$")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::sdf::reader;
    use std::io::Cursor;

    const TWO_RECORDS: &str = "\
full_1
  prog

  1  0  0     0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
M  END
> <note>
first

$$$$
full_2
  prog

  1  0  0     0  0  0  0  0  0999 V2000
    1.5000    0.0000    0.0000 N   0  0  0  0  0  0  0  0  0  0  0  0
M  END
$$$$
";

    #[test]
    fn writes_records_back_byte_for_byte() {
        let records = reader::read(Cursor::new(TWO_RECORDS)).expect("read sdf");

        let mut buf = Vec::new();
        let written = write(&mut buf, &records).expect("write sdf");

        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), TWO_RECORDS);
    }

    #[test]
    fn writes_in_given_order() {
        let records = reader::read(Cursor::new(TWO_RECORDS)).expect("read sdf");

        let mut buf = Vec::new();
        write(&mut buf, records.iter().rev()).expect("write sdf");
        let reread = reader::read(Cursor::new(buf)).expect("reread sdf");

        let titles: Vec<_> = reread.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["full_2", "full_1"]);
        assert_eq!(reread[0].table.atoms[0].symbol, "N");
    }
}
