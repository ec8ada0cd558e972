//! Reading and writing SD files and title lists.
//!
//! SD records are carried verbatim: [`read_sdf`] keeps each record's text and
//! [`write_sdf`] reproduces it unchanged. Title lists are plain text, one
//! title per line, and form the contract between pipeline stages.

pub mod error;
pub mod titles;

mod sdf {
    pub mod reader;
    pub mod writer;
}

pub use error::Error;
pub use sdf::reader::{Records, read as read_records};
pub use sdf::writer::write as write_records;

use crate::model::record::Record;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Opens `path` for buffered reading, failing fast if it cannot be opened.
pub fn open_reader(path: &Path) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    Ok(BufReader::new(file))
}

/// Creates (or truncates) `path` for buffered writing.
pub fn create_writer(path: &Path) -> Result<BufWriter<File>, Error> {
    let file = File::create(path).map_err(|e| Error::create(path, e))?;
    Ok(BufWriter::new(file))
}

pub fn read_sdf(path: &Path) -> Result<Vec<Record>, Error> {
    let records = read_records(open_reader(path)?)?;
    debug!(path = %path.display(), records = records.len(), "read SD file");
    Ok(records)
}

pub fn write_sdf<'a, I>(path: &Path, records: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = &'a Record>,
{
    let count = write_records(create_writer(path)?, records)?;
    debug!(path = %path.display(), records = count, "wrote SD file");
    Ok(count)
}

pub fn read_title_file(path: &Path) -> Result<Vec<String>, Error> {
    titles::read(open_reader(path)?)
}

pub fn write_title_file<I, S>(path: &Path, list: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let count = titles::write(create_writer(path)?, list)?;
    debug!(path = %path.display(), titles = count, "wrote title list");
    Ok(count)
}

/// Concatenates the raw bytes of `inputs` into `output`, in order.
///
/// No parsing takes place: the result is exactly the first file followed by
/// the next, which is how SD files are combined.
pub fn concat_files(inputs: &[&Path], output: &Path) -> Result<u64, Error> {
    let mut writer = create_writer(output)?;
    let mut total = 0;
    for path in inputs {
        let mut reader = open_reader(path)?;
        total += std::io::copy(&mut reader, &mut writer)?;
    }
    writer.flush()?;
    debug!(output = %output.display(), bytes = total, "concatenated files");
    Ok(total)
}

