//! # arff_instances
//!
//! A streaming reader for ARFF (Attribute-Relation File Format) datasets.
//!
//! ## What is ARFF?
//!
//! ARFF is a line-oriented text format: a header names the relation and declares
//! an ordered list of numeric, nominal and date attributes, and a data section
//! lists one record per line, either densely (one value per attribute) or
//! sparsely (`{index value, ...}`).
//!
//! ## Key Features
//!
//! - **Pull-based**: one record per call, nothing read ahead beyond the current line
//! - **Dense and sparse records**: both shapes decode into a single [`Record`] type
//! - **Class attribute**: a selected attribute is diverted into the record label
//! - **Explicit errors**: read, header, value and schema failures come back as [`Error`]
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use arff_instances::ArffReader;
//!
//! let input = "\
//! @relation weather
//! @attribute temperature numeric
//! @attribute play {yes, no}
//! @data
//! 21.5, yes
//! {0 17}
//! ";
//!
//! // Last attribute is the class
//! let mut reader = ArffReader::open(input.as_bytes(), 2, -1).unwrap();
//! assert_eq!(reader.catalog().relation(), "weather");
//!
//! let first = reader.read_record().unwrap().unwrap();
//! assert_eq!(first.attribute(0), Some(21.5));
//! assert_eq!(first.label(), 0.0); // "yes"
//!
//! let second = reader.read_record().unwrap().unwrap();
//! assert!(second.is_sparse());
//! assert_eq!(second.to_dense(), vec![17.0]);
//!
//! assert!(reader.read_record().unwrap().is_none());
//! ```
//!
//! ### Modifying a Record
//!
//! Records are immutable; builders make independent copies.
//!
//! ```rust
//! use arff_instances::DenseRecordBuilder;
//!
//! let original = DenseRecordBuilder::new().set_attributes(vec![1.0, 2.0]).build();
//! let changed = DenseRecordBuilder::from_record(&original)
//!     .set_label(1.0)
//!     .build();
//! assert_eq!(original.label(), 0.0);
//! assert_eq!(changed.label(), 1.0);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (header summary at `debug`, each decoded
//! record at `trace`, tolerated oddities at `warn`) and never installs a
//! subscriber itself.
//!
//! ## Format Details
//!
//! See the [`format`] module for the exact dialect accepted.

pub mod attribute;
pub mod date;
pub mod error;
pub mod format;
pub mod header;
pub mod lexer;
pub mod options;
pub mod reader;
pub mod record;

pub use attribute::{Attribute, AttributeKind, Catalog};
pub use date::DatePattern;
pub use error::{Error, Result};
pub use options::{ClassSelector, ReaderOptions, ShortRowPolicy};
pub use reader::ArffReader;
pub use record::{
    AttributeFlags, DenseRecord, DenseRecordBuilder, Record, SparseRecord, SparseRecordBuilder,
};

use std::io;

/// Reads every record from a string of ARFF text, last attribute as class.
///
/// # Examples
///
/// ```rust
/// use arff_instances::from_str;
///
/// let records = from_str("@attribute x numeric\n@attribute y numeric\n@data\n1,2\n3,4\n").unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].label(), 4.0);
/// ```
///
/// # Errors
///
/// Returns the first header, value or schema error encountered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Vec<Record>> {
    from_str_with_options(input, ReaderOptions::default())
}

/// Reads every record from a string of ARFF text with custom options.
///
/// # Examples
///
/// ```rust
/// use arff_instances::{from_str_with_options, ClassSelector, ReaderOptions};
///
/// let options = ReaderOptions::new().with_class(ClassSelector::None);
/// let records = from_str_with_options("@attribute x numeric\n@data\n7\n", options).unwrap();
/// assert_eq!(records[0].attribute(0), Some(7.0));
/// ```
///
/// # Errors
///
/// Returns the first header, value or schema error encountered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(input: &str, options: ReaderOptions) -> Result<Vec<Record>> {
    ArffReader::with_options(input.as_bytes(), options)?.read_all()
}

/// Opens a streaming reader over any [`io::Read`] source.
///
/// The source is wrapped in a [`io::BufReader`]; pass an already-buffered
/// source to [`ArffReader::with_options`] directly to avoid double buffering.
///
/// # Examples
///
/// ```rust
/// use arff_instances::{from_reader, ReaderOptions};
/// use std::io::Cursor;
///
/// let bytes = b"@attribute x numeric\n@data\n1\n2\n";
/// let reader = from_reader(Cursor::new(bytes), ReaderOptions::default()).unwrap();
/// assert_eq!(reader.count(), 2);
/// ```
///
/// # Errors
///
/// Returns any header error or a failure reading the header from `reader`.
pub fn from_reader<R>(reader: R, options: ReaderOptions) -> Result<ArffReader<io::BufReader<R>>>
where
    R: io::Read,
{
    ArffReader::with_options(io::BufReader::new(reader), options)
}
