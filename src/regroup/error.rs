use thiserror::Error;

/// Errors raised by the regrouping transformations.
#[derive(Debug, Error)]
pub enum Error {
    /// A structure key could not be computed for a record.
    #[error("failed to compute structure key: {0}")]
    Canon(#[from] crate::canon::Error),

    /// A title from the grouping list is absent from the reloaded records.
    ///
    /// The reloaded subset and the title list disagree; the extraction step
    /// has to be rerun before the order can be recovered.
    #[error("title '{title}' is not present in the reloaded records")]
    MissingTitle {
        /// The title that could not be found.
        title: String,
    },

    /// Two records of the input share a title.
    ///
    /// Titles are the only handle the later stages have on a record, so a
    /// repeated title would make recovery pick the wrong conformer.
    #[error("title '{title}' is used by records {first} and {second}")]
    DuplicateTitle {
        /// The repeated title.
        title: String,
        /// Position of its first use.
        first: usize,
        /// Position of the repeat.
        second: usize,
    },

    /// A position refers past the end of the sequence it indexes.
    #[error("position {position} is out of range for {len} records")]
    PositionOutOfRange {
        /// The offending position.
        position: usize,
        /// Length of the indexed sequence.
        len: usize,
    },
}

impl Error {
    pub fn missing_title(title: impl Into<String>) -> Self {
        Self::MissingTitle {
            title: title.into(),
        }
    }
}
