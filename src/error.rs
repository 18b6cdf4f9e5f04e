//! Error types for ARFF reading.
//!
//! Every failure the reader can hit is surfaced as a value of [`Error`]; nothing is
//! logged and swallowed. The variants fall into four groups:
//!
//! - **Read errors**: the underlying stream failed, or a quoted string never closed
//! - **Header errors**: a directive is malformed or the `@DATA` marker is missing
//! - **Value errors**: a token does not parse as a number or date, or names an unknown label
//! - **Schema errors**: a record does not fit the declared attributes
//!
//! Errors that arise while decoding a data line leave the reader positioned at the
//! start of the next line, so a caller may log the error and keep reading.
//!
//! ## Examples
//!
//! ```rust
//! use arff_instances::{from_str, Error};
//!
//! let input = "@ATTRIBUTE a numeric\n@DATA\nabc\n";
//! let result = from_str(input);
//! assert!(matches!(result, Err(Error::InvalidNumber { .. })));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while reading ARFF input.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The underlying character source failed.
    #[error("IO error at line {line}: {msg}")]
    Io { line: usize, msg: String },

    /// A quoted string ran into the end of its line.
    #[error("Unterminated quoted string at line {line}, column {col}")]
    UnterminatedQuote { line: usize, col: usize },

    /// Malformed header directive.
    #[error("Header error at line {line}, column {col}: {msg}")]
    Header { line: usize, col: usize, msg: String },

    /// End of input reached before `@DATA`.
    #[error("No @DATA section found before end of input")]
    MissingDataSection,

    /// A nominal attribute declared the same label twice.
    #[error("Duplicate label '{label}' in nominal attribute '{attribute}'")]
    DuplicateLabel { attribute: String, label: String },

    /// A token that must be numeric is not.
    #[error("Invalid number '{text}' for attribute {index} at line {line}, column {col}")]
    InvalidNumber {
        line: usize,
        col: usize,
        index: usize,
        text: String,
    },

    /// A nominal value that is not among the attribute's labels.
    #[error("Unknown label '{label}' for nominal attribute '{attribute}' at line {line}, column {col}")]
    UnknownLabel {
        line: usize,
        col: usize,
        attribute: String,
        label: String,
    },

    /// A date value that does not match the attribute's pattern.
    #[error("Invalid date '{text}' for attribute '{attribute}' at line {line}, column {col} (expected {pattern})")]
    InvalidDate {
        line: usize,
        col: usize,
        attribute: String,
        text: String,
        pattern: String,
    },

    /// A record does not fit the declared attribute count.
    #[error("Schema mismatch at line {line}: {msg}")]
    SchemaMismatch { line: usize, msg: String },

    /// A record or builder was addressed beyond its attribute count.
    #[error("Attribute index {index} out of range for {len} attributes")]
    AttributeOutOfRange { index: usize, len: usize },

    /// The requested class attribute does not exist.
    #[error("Class attribute {requested} requested but the header declares {available} attributes")]
    InvalidClassIndex { requested: usize, available: usize },

    /// More than one kind flag was set for the same attribute.
    #[error("Attribute {index} cannot be more than one of numeric, nominal and date")]
    ContradictoryMetadata { index: usize },

    /// The reader stopped after an I/O failure and has not been resumed.
    #[error("Reader halted after an I/O failure; call resume() to continue")]
    Halted,
}

impl Error {
    /// Creates an I/O error for a failed read on the given line.
    pub fn io(line: usize, err: &std::io::Error) -> Self {
        Error::Io {
            line,
            msg: err.to_string(),
        }
    }

    /// Creates a header error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arff_instances::Error;
    ///
    /// let err = Error::header(3, 11, "@ATTRIBUTE without a type");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn header(line: usize, col: usize, msg: &str) -> Self {
        Error::Header {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an invalid-number error for the attribute at `index`.
    pub fn invalid_number(line: usize, col: usize, index: usize, text: &str) -> Self {
        Error::InvalidNumber {
            line,
            col,
            index,
            text: text.to_string(),
        }
    }

    /// Creates an unknown-label error for a nominal attribute.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arff_instances::Error;
    ///
    /// let err = Error::unknown_label(5, 1, "color", "purple");
    /// assert!(err.to_string().contains("'purple'"));
    /// ```
    pub fn unknown_label(line: usize, col: usize, attribute: &str, label: &str) -> Self {
        Error::UnknownLabel {
            line,
            col,
            attribute: attribute.to_string(),
            label: label.to_string(),
        }
    }

    /// Creates a schema-mismatch error.
    pub fn schema_mismatch(line: usize, msg: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            line,
            msg: msg.into(),
        }
    }

    /// Returns `true` if this error came from the character source itself.
    ///
    /// Read errors halt the reader; every other error only affects the
    /// line it occurred on.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
