//! Streaming record decoder.
//!
//! [`ArffReader`] parses the header once when it is opened and then hands out
//! one [`Record`] per call to [`read_record`](ArffReader::read_record), pulling
//! only as many characters from the source as that record needs.
//!
//! ## Line shapes
//!
//! A line whose first token is `{` is sparse, anything else is dense:
//!
//! ```text
//! 1.5, red, ?            dense: one value per attribute, in order
//! {0 1.5, 2 blue}        sparse: index/value pairs, unlisted positions are 0
//! 1.5, red, ?, {0.25}    optional trailing weight block
//! ```
//!
//! The class attribute, when one is selected, is diverted into the record label
//! and takes no position in the record.
//!
//! ## Errors and recovery
//!
//! Value and schema errors only spoil their own line: the reader discards the
//! rest of it and the next call starts on the following line. A read error from
//! the source halts the reader until [`resume`](ArffReader::resume) is called.
//!
//! ```rust
//! use arff_instances::{ArffReader, Error};
//!
//! let input = "@attribute a numeric\n@data\n1\nbad\n3\n";
//! let mut reader = ArffReader::open(input.as_bytes(), 0, 0).unwrap();
//!
//! assert_eq!(reader.read_record().unwrap().unwrap().attribute(0), Some(1.0));
//! assert!(matches!(reader.read_record(), Err(Error::InvalidNumber { .. })));
//! assert_eq!(reader.read_record().unwrap().unwrap().attribute(0), Some(3.0));
//! assert!(reader.read_record().unwrap().is_none());
//! ```

use crate::attribute::{Attribute, AttributeKind, Catalog};
use crate::date::DatePattern;
use crate::header::parse_header;
use crate::lexer::{parse_number, Token, TokenKind, Tokenizer};
use crate::options::{ClassSelector, ReaderOptions, ShortRowPolicy};
use crate::record::{DenseRecordBuilder, Record, SparseRecordBuilder};
use crate::{Error, Result};
use std::io::BufRead;
use tracing::{debug, trace};

/// Upper bound on the capacity `read_all` reserves from the declared record count.
const MAX_PREALLOCATED_RECORDS: usize = 1 << 16;

/// Pull-based ARFF reader over a buffered character source.
///
/// Not restartable: the reader only moves forward through its source.
pub struct ArffReader<R> {
    tokens: Tokenizer<R>,
    catalog: Catalog,
    options: ReaderOptions,
    current: Token,
    resync: bool,
    halted: bool,
    records_read: usize,
}

impl<'a> ArffReader<&'a [u8]> {
    /// Opens a reader over in-memory text with default options.
    ///
    /// # Errors
    ///
    /// Returns any header error.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Result<Self> {
        Self::with_options(input.as_bytes(), ReaderOptions::default())
    }
}

impl<R: BufRead> ArffReader<R> {
    /// Opens a reader and parses the header.
    ///
    /// `class_selector` picks the class attribute: negative for the last one,
    /// zero for none, `n` for the `n`th (1-based). `declared_record_count` is a
    /// capacity hint only.
    ///
    /// # Errors
    ///
    /// Returns any header error (see [`parse_header`]).
    pub fn open(source: R, declared_record_count: usize, class_selector: i32) -> Result<Self> {
        let options = ReaderOptions::new()
            .with_declared_record_count(declared_record_count)
            .with_class(ClassSelector::from(class_selector));
        Self::with_options(source, options)
    }

    /// Opens a reader with explicit options and parses the header.
    ///
    /// # Errors
    ///
    /// Returns any header error (see [`parse_header`]).
    pub fn with_options(source: R, options: ReaderOptions) -> Result<Self> {
        let mut tokens = Tokenizer::new(source);
        let (catalog, current) = parse_header(&mut tokens, &options)?;
        Ok(ArffReader {
            tokens,
            catalog,
            options,
            current,
            resync: false,
            halted: false,
            records_read: 0,
        })
    }

    /// The attributes declared in the header.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The options this reader was opened with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Number of records successfully returned so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// `true` after a read error, until [`resume`](Self::resume) is called.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Acknowledges a read error and lets reading continue.
    ///
    /// Whatever part of a line was read before the failure is discarded.
    pub fn resume(&mut self) {
        if self.halted {
            self.halted = false;
            self.resync = true;
        }
    }

    /// Reads the next record, or `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::Halted`] while the reader is halted
    /// - [`Error::Io`] if the source fails; the reader halts
    /// - value errors ([`Error::InvalidNumber`], [`Error::UnknownLabel`],
    ///   [`Error::InvalidDate`]) and [`Error::SchemaMismatch`] for a bad line;
    ///   the line is skipped and the next call continues after it
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.halted {
            return Err(Error::Halted);
        }

        match self.next_record() {
            Ok(Some(record)) => {
                self.records_read += 1;
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                if e.is_io() {
                    self.halted = true;
                } else {
                    self.resync = true;
                }
                debug!("Failed to decode record: {}", e);
                Err(e)
            }
        }
    }

    /// Reads every remaining record, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error [`read_record`](Self::read_record) reports.
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(
            self.options
                .declared_record_count
                .min(MAX_PREALLOCATED_RECORDS),
        );
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.tokens.next_token()?;
        Ok(())
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if self.resync {
            self.resync = false;
            self.skip_rest_of_line()?;
        }
        while self.current.kind == TokenKind::Eol {
            self.advance()?;
        }

        let line = self.current.line;
        let record = match self.current.kind {
            TokenKind::Eof => return Ok(None),
            TokenKind::OpenBrace => self.read_sparse()?,
            _ => self.read_dense()?,
        };
        trace!(
            "Decoded {} record at line {}",
            if record.is_sparse() { "sparse" } else { "dense" },
            line
        );
        Ok(Some(record))
    }

    fn skip_rest_of_line(&mut self) -> Result<()> {
        while !self.current.kind.ends_line() {
            match self.advance() {
                Ok(()) | Err(Error::UnterminatedQuote { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        if self.current.kind == TokenKind::Eol {
            self.advance()?;
        }
        Ok(())
    }

    fn read_dense(&mut self) -> Result<Record> {
        let declared = self.catalog.num_attributes();
        let mut builder = DenseRecordBuilder::new();
        builder.set_attributes(vec![0.0; self.catalog.num_record_attributes()]);
        for (index, attribute) in self.catalog.attributes().iter().enumerate() {
            if let Some(slot) = self.catalog.slot_of(index) {
                builder.set_attribute_kind(slot, attribute.kind())?;
            }
        }

        let mut index = 0;
        while !self.current.kind.ends_line() {
            if self.current.kind == TokenKind::OpenBrace {
                let weight = self.read_weight()?;
                builder.set_weight(weight);
                self.expect_line_end()?;
                break;
            }
            if index >= declared {
                return Err(Error::schema_mismatch(
                    self.current.line,
                    format!("more values than the {} declared attributes", declared),
                ));
            }
            let value = self.decode_value(index)?;
            match self.catalog.slot_of(index) {
                Some(slot) => {
                    builder.set_attribute(slot, value)?;
                }
                None => {
                    builder.set_label(value);
                }
            }
            index += 1;
            self.advance()?;
        }

        if index < declared && self.options.short_rows == ShortRowPolicy::Reject {
            return Err(Error::schema_mismatch(
                self.current.line,
                format!("found {} values, expected {}", index, declared),
            ));
        }
        Ok(Record::Dense(builder.build()))
    }

    fn read_sparse(&mut self) -> Result<Record> {
        let declared = self.catalog.num_attributes();
        let mut builder = SparseRecordBuilder::new();
        builder.num_attributes(self.catalog.num_record_attributes());
        for (index, attribute) in self.catalog.attributes().iter().enumerate() {
            if let Some(slot) = self.catalog.slot_of(index) {
                builder.set_attribute_kind(slot, attribute.kind())?;
            }
        }

        self.advance()?;
        loop {
            if self.current.kind == TokenKind::CloseBrace {
                self.advance()?;
                break;
            }
            let index = self.sparse_index()?;
            if index >= declared {
                return Err(Error::schema_mismatch(
                    self.current.line,
                    format!(
                        "attribute index {} beyond the {} declared attributes",
                        index, declared
                    ),
                ));
            }
            self.advance()?;
            let value = self.decode_value(index)?;
            match self.catalog.slot_of(index) {
                Some(slot) => {
                    builder.set_attribute(slot, value)?;
                }
                None => {
                    builder.set_label(value);
                }
            }
            self.advance()?;
        }

        if self.current.kind == TokenKind::OpenBrace {
            let weight = self.read_weight()?;
            builder.set_weight(weight);
        }
        self.expect_line_end()?;
        Ok(Record::Sparse(builder.build()))
    }

    fn sparse_index(&self) -> Result<usize> {
        let token = &self.current;
        match &token.kind {
            TokenKind::Number { text, .. } | TokenKind::Word(text) | TokenKind::Quoted(text) => {
                text.parse::<usize>().map_err(|_| {
                    Error::schema_mismatch(
                        token.line,
                        format!("invalid sparse attribute index '{}'", text),
                    )
                })
            }
            other => Err(Error::schema_mismatch(
                token.line,
                format!("unterminated sparse record: found {}", other.describe()),
            )),
        }
    }

    /// Reads a `{weight}` block starting at the current `{`.
    fn read_weight(&mut self) -> Result<f64> {
        self.advance()?;
        let weight = match &self.current.kind {
            TokenKind::Number { value, .. } => *value,
            other => {
                return Err(Error::schema_mismatch(
                    self.current.line,
                    format!("expected a weight, found {}", other.describe()),
                ))
            }
        };
        self.advance()?;
        if self.current.kind != TokenKind::CloseBrace {
            return Err(Error::schema_mismatch(
                self.current.line,
                "unterminated weight block",
            ));
        }
        self.advance()?;
        Ok(weight)
    }

    fn expect_line_end(&self) -> Result<()> {
        if self.current.kind.ends_line() {
            return Ok(());
        }
        Err(Error::schema_mismatch(
            self.current.line,
            format!(
                "unexpected {} at column {}",
                self.current.kind.describe(),
                self.current.col
            ),
        ))
    }

    /// Decodes the current token as a value of attribute `index`.
    fn decode_value(&self, index: usize) -> Result<f64> {
        let token = &self.current;
        let attribute = self.catalog.attribute(index).ok_or_else(|| {
            Error::schema_mismatch(token.line, format!("no attribute at index {}", index))
        })?;

        match &token.kind {
            TokenKind::Word(w) if w == "?" => Ok(f64::NAN),
            TokenKind::Number { value, text } => match attribute.kind() {
                AttributeKind::Nominal => nominal_from_number(attribute, token, *value, text),
                AttributeKind::Date => decode_date(attribute, token, text).or(Ok(*value)),
                AttributeKind::Numeric | AttributeKind::Unset => Ok(*value),
            },
            TokenKind::Word(text) | TokenKind::Quoted(text) => match attribute.kind() {
                AttributeKind::Nominal => attribute
                    .index_of_value(text)
                    .map(|i| i as f64)
                    .ok_or_else(|| {
                        Error::unknown_label(token.line, token.col, attribute.name(), text)
                    }),
                AttributeKind::Date => decode_date(attribute, token, text),
                AttributeKind::Numeric | AttributeKind::Unset => parse_number(text.trim())
                    .ok_or_else(|| Error::invalid_number(token.line, token.col, index, text)),
            },
            other => Err(Error::schema_mismatch(
                token.line,
                format!(
                    "expected a value for attribute '{}', found {}",
                    attribute.name(),
                    other.describe()
                ),
            )),
        }
    }
}

impl<R: BufRead> Iterator for ArffReader<R> {
    type Item = Result<Record>;

    /// Yields records and per-line errors; stops for good after a read error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        self.read_record().transpose()
    }
}

/// Resolves a numeric literal against a nominal attribute.
///
/// Tries the literal text, then its canonical decimal form (`1` as `1.0`),
/// then any label that reads as the same number.
fn nominal_from_number(attribute: &Attribute, token: &Token, value: f64, text: &str) -> Result<f64> {
    attribute
        .index_of_value(text)
        .or_else(|| attribute.index_of_value(&canonical_decimal(value)))
        .or_else(|| {
            attribute
                .labels()
                .position(|label| parse_number(label) == Some(value))
        })
        .map(|i| i as f64)
        .ok_or_else(|| Error::unknown_label(token.line, token.col, attribute.name(), text))
}

fn decode_date(attribute: &Attribute, token: &Token, text: &str) -> Result<f64> {
    let fallback;
    let pattern = match attribute.date_pattern() {
        Some(pattern) => pattern,
        None => {
            fallback = DatePattern::default();
            &fallback
        }
    };
    pattern.parse_millis(text).ok_or_else(|| Error::InvalidDate {
        line: token.line,
        col: token.col,
        attribute: attribute.name().to_string(),
        text: text.to_string(),
        pattern: pattern.pattern().to_string(),
    })
}

/// Shortest decimal text of `value`, always with a fractional part:
/// `1.0`, `0.25`, `1.0E7`, `1.5E-4`.
pub(crate) fn canonical_decimal(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let text = value.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{}.0", text)
        }
    } else {
        let text = format!("{:E}", value);
        match text.split_once('E') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                format!("{}.0E{}", mantissa, exponent)
            }
            _ => text,
        }
    }
}
