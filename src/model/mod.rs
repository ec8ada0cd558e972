//! Data structures for conformer records read from SD files.
//!
//! - [`types`] – Bond orders and CTfile stereo/charge codes.
//! - [`atom`] – Atom with element symbol, coordinates, formal charge and parity.
//! - [`table`] – Connection table (atoms and bonds) of one molfile.
//! - [`record`] – A full SD record: verbatim text, title, parsed table and data items.
//!
//! A [`Record`](record::Record) keeps its original text so that regrouping and
//! renumbering never alter a structure; the parsed
//! [`ConnectionTable`](table::ConnectionTable) exists only to derive structure keys.

pub mod atom;
pub mod record;
pub mod table;
pub mod types;
