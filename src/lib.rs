//! Regrouping of conformer libraries stored as multi-record SD files.
//!
//! Conformer generators and export tools sometimes emit the conformers of one
//! molecule in several non-adjacent runs. Downstream tools that treat a
//! contiguous run of records as "one molecule" then see the same structure
//! twice. This crate finds those split structures, moves each one back into a
//! single contiguous run, and renumbers the result with sequential titles.
//!
//! # Features
//!
//! - **Structure keys**: graph-based canonical keys computed from the
//!   connection table, or keys precomputed in an SD data item
//! - **Split detection**: first-seen grouping of record positions and a
//!   contiguity test per structure
//! - **Natural ordering**: `full_2` sorts before `full_10`
//! - **Order recovery**: restores the grouped order of a subset that an
//!   extraction step returned in source order
//! - **Verbatim SD I/O**: records are written back byte-for-byte, apart from
//!   retitling
//!
//! # Quick Start
//!
//! ```
//! use conf_regroup::{TagCanonicalizer, detect, partition, read_records, renumber};
//! use std::io::Cursor;
//!
//! let record = |title: &str, key: &str| {
//!     format!("{title}\n\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n> <KEY>\n{key}\n\n$$$$\n")
//! };
//! let sdf: String = [("full_1", "A"), ("full_2", "B"), ("full_3", "A")]
//!     .iter()
//!     .map(|(t, k)| record(t, k))
//!     .collect();
//!
//! let records = read_records(Cursor::new(sdf))?;
//! let canon = TagCanonicalizer::new("KEY");
//!
//! let index = detect(&records, &canon)?;
//! assert_eq!(index.split_groups().count(), 1);
//!
//! let titles: Vec<String> = records.iter().map(|r| r.title().to_string()).collect();
//! let part = partition(&titles, &index)?;
//! assert_eq!(part.redo, vec!["full_1", "full_3"]);
//! assert_eq!(part.good, vec!["full_2"]);
//!
//! let renumbered = renumber(&records, "conf");
//! assert_eq!(renumbered[2].title(), "conf_3");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: SD file and title-list reading and writing
//! - [`canon`]: structure keys and the [`Canonicalizer`] trait
//! - [`regroup`]: the in-memory transformations
//! - [`pipeline`]: file-level stages and the TOML-configured full run
//!
//! # Data Types
//!
//! - [`Record`]: one SD record, its verbatim text plus parsed contents
//! - [`ConnectionTable`]: atoms and bonds of a record
//! - [`Atom`], [`Bond`], [`BondOrder`], [`BondStereo`], [`Parity`]
//! - [`StructureKey`]: canonical string naming one structure
//! - [`GroupIndex`] and [`Group`]: record positions per structure

mod model;

pub mod canon;
pub mod io;
pub mod pipeline;
pub mod regroup;

pub use model::atom::Atom;
pub use model::record::{DataItem, Record};
pub use model::table::{Bond, ConnectionTable};
pub use model::types::{BondOrder, BondStereo, Parity};

pub use canon::{
    CanonConfig, CanonMethod, Canonicalizer, GraphCanonicalizer, StructureKey, TagCanonicalizer,
};
pub use io::{read_records, write_records};
pub use pipeline::{PipelineConfig, run_all};
pub use regroup::{
    Group, GroupIndex, GroupingReport, Partition, detect, natural_cmp, partition, recover_order,
    regroup, renumber, verify_grouping, verify_regrouped,
};
