use crate::io::error::Error;
use std::io::{BufRead, Write};

/// Reads a title list: one title per line, no header, no escaping.
///
/// Line endings (`\n` or `\r\n`) are stripped; empty lines are skipped so a
/// trailing newline never yields an empty title.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<String>, Error> {
    let mut titles = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let title = line.trim_end_matches('\r');
        if !title.is_empty() {
            titles.push(title.to_string());
        }
    }
    Ok(titles)
}

/// Writes one title per line, each newline-terminated.
pub fn write<W, I, S>(mut writer: W, titles: I) -> Result<usize, Error>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut count = 0;
    for title in titles {
        writeln!(writer, "{}", title.as_ref())?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_newline_terminated_lines() {
        let mut buf = Vec::new();
        let n = write(&mut buf, ["full_1", "full_10", "full_2"]).unwrap();
        assert_eq!(n, 3);
        assert_eq!(String::from_utf8(buf).unwrap(), "full_1\nfull_10\nfull_2\n");
    }

    #[test]
    fn reads_lines_and_strips_carriage_returns() {
        let titles = read(Cursor::new("full_1\r\nfull_2\n\nfull_3\n")).unwrap();
        assert_eq!(titles, vec!["full_1", "full_2", "full_3"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(read(Cursor::new("")).unwrap().is_empty());
    }
}
