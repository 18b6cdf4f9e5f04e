//! Header parsing.
//!
//! Reads directives up to and including `@DATA` and builds the [`Catalog`].
//! Directive names are matched case-insensitively; everything else (attribute
//! names, labels, type keywords after lowercasing) is taken as written.
//! Directives this parser does not know are skipped to the end of their line.

use crate::attribute::{Attribute, Catalog};
use crate::date::DatePattern;
use crate::lexer::{Token, TokenKind, Tokenizer};
use crate::options::{ClassSelector, ReaderOptions};
use crate::{Error, Result};
use std::io::BufRead;
use tracing::{debug, warn};

/// Parses the header and returns the catalog plus the first token after `@DATA`.
///
/// # Errors
///
/// - [`Error::Header`] for an `@RELATION` without a name, an `@ATTRIBUTE` without
///   a name or type, or a label list that is not closed on its line
/// - [`Error::DuplicateLabel`] for a label declared twice in one list
/// - [`Error::MissingDataSection`] if input ends before `@DATA`
/// - [`Error::InvalidClassIndex`] if the selected class attribute does not exist
/// - any read error from the tokenizer
pub fn parse_header<R: BufRead>(
    tokens: &mut Tokenizer<R>,
    options: &ReaderOptions,
) -> Result<(Catalog, Token)> {
    let mut catalog = Catalog::new(options.default_relation.clone());

    let first_data_token = loop {
        let token = tokens.next_token()?;
        let directive = match &token.kind {
            TokenKind::Eof => return Err(Error::MissingDataSection),
            TokenKind::Word(w) if w.starts_with('@') => w.to_ascii_uppercase(),
            _ => continue,
        };

        match directive.as_str() {
            "@RELATION" => {
                let name = tokens.next_token()?;
                let text = name.kind.text().ok_or_else(|| {
                    Error::header(name.line, name.col, "@RELATION without a name")
                })?;
                catalog.set_relation(text);
            }
            "@ATTRIBUTE" => {
                let attribute = parse_attribute(tokens)?;
                catalog.push(attribute);
            }
            "@DATA" => break tokens.next_token()?,
            _ => {
                warn!(
                    "Skipping unknown directive {} at line {}",
                    directive, token.line
                );
                skip_line(tokens)?;
            }
        }
    };

    let class_index = match options.class {
        ClassSelector::None => None,
        ClassSelector::Last => catalog.num_attributes().checked_sub(1),
        ClassSelector::Index(i) => Some(i),
    };
    catalog.set_class_index(class_index)?;

    debug!(
        "Parsed header for relation '{}': {} attributes, class index {:?}",
        catalog.relation(),
        catalog.num_attributes(),
        catalog.class_index()
    );

    Ok((catalog, first_data_token))
}

fn parse_attribute<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<Attribute> {
    let name_token = tokens.next_token()?;
    let name = name_token
        .kind
        .text()
        .ok_or_else(|| {
            Error::header(
                name_token.line,
                name_token.col,
                "@ATTRIBUTE without a name",
            )
        })?
        .to_string();

    let type_token = tokens.next_token()?;
    match type_token.kind {
        TokenKind::OpenBrace => {
            let labels = parse_labels(tokens, &name)?;
            Attribute::nominal(name, labels)
        }
        TokenKind::Word(ref t) | TokenKind::Quoted(ref t) | TokenKind::Number { text: ref t, .. } => {
            match t.to_ascii_lowercase().as_str() {
                "numeric" | "real" | "integer" => Ok(Attribute::numeric(name)),
                "date" => {
                    let next = tokens.next_token()?;
                    let pattern = match next.kind {
                        TokenKind::Word(ref p) | TokenKind::Quoted(ref p) => DatePattern::new(p),
                        _ => DatePattern::default(),
                    };
                    Ok(Attribute::date(name, pattern))
                }
                other => {
                    warn!(
                        "Attribute '{}' has unsupported type '{}' at line {}; reading it as numeric",
                        name, other, type_token.line
                    );
                    Ok(Attribute::numeric(name))
                }
            }
        }
        _ => Err(Error::header(
            type_token.line,
            type_token.col,
            &format!("@ATTRIBUTE '{}' without a type", name),
        )),
    }
}

fn parse_labels<R: BufRead>(tokens: &mut Tokenizer<R>, name: &str) -> Result<Vec<String>> {
    let mut labels = Vec::new();
    loop {
        let token = tokens.next_token()?;
        match token.kind {
            TokenKind::CloseBrace => return Ok(labels),
            TokenKind::Word(s) | TokenKind::Quoted(s) | TokenKind::Number { text: s, .. } => {
                labels.push(s)
            }
            other => {
                return Err(Error::header(
                    token.line,
                    token.col,
                    &format!(
                        "unterminated label list for attribute '{}': found {}",
                        name,
                        other.describe()
                    ),
                ))
            }
        }
    }
}

/// Consumes tokens up to and including the end of the current line.
pub(crate) fn skip_line<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<()> {
    loop {
        match tokens.next_token() {
            Ok(token) if token.kind.ends_line() => return Ok(()),
            Ok(_) | Err(Error::UnterminatedQuote { .. }) => {}
            Err(e) => return Err(e),
        }
    }
}
