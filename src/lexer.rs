//! Tokenizer for ARFF text.
//!
//! The [`Tokenizer`] pulls characters from any [`BufRead`] source one line at a
//! time and classifies them into [`Token`]s:
//!
//! - characters at or below the space character, and `,`, are whitespace
//! - `%` starts a comment that runs to the end of the line
//! - `"` and `'` start quoted strings; a backslash only escapes the quote or itself
//! - `{` and `}` are single-character tokens
//! - anything else accumulates into a word, reported as a number when it reads as one
//!
//! Line ends are significant and come out as [`TokenKind::Eol`]; the end of the
//! source is [`TokenKind::Eof`], returned again on every later call.
//!
//! ```rust
//! use arff_instances::lexer::{TokenKind, Tokenizer};
//!
//! let mut tokens = Tokenizer::new("1.5, 'a b' % note\n".as_bytes());
//! assert!(matches!(tokens.next_token().unwrap().kind, TokenKind::Number { .. }));
//! assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Quoted("a b".to_string()));
//! assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Eol);
//! assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Eof);
//! ```

use crate::{Error, Result};
use std::io::BufRead;

/// What a token is, with its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Unquoted text that does not read as a number.
    Word(String),
    /// Content of a single- or double-quoted string.
    Quoted(String),
    /// Unquoted text that reads as a number; `text` is kept verbatim.
    Number { value: f64, text: String },
    OpenBrace,
    CloseBrace,
    Eol,
    Eof,
}

impl TokenKind {
    /// Returns the token text for words, quoted strings and numbers.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            TokenKind::Word(s) | TokenKind::Quoted(s) => Some(s),
            TokenKind::Number { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Returns `true` for the tokens that end a line of input.
    #[must_use]
    pub fn ends_line(&self) -> bool {
        matches!(self, TokenKind::Eol | TokenKind::Eof)
    }

    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Word(_) => "word",
            TokenKind::Quoted(_) => "quoted string",
            TokenKind::Number { .. } => "number",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::Eol => "end of line",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token and the position of its first character.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

/// Line-buffered ARFF tokenizer.
///
/// All state (source, current line, cursor) lives in the value, so independent
/// tokenizers over different sources never interfere. It only moves forward.
pub struct Tokenizer<R> {
    source: R,
    buf: Vec<char>,
    pos: usize,
    line: usize,
    exhausted: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(source: R) -> Self {
        Tokenizer {
            source,
            buf: Vec::new(),
            pos: 0,
            line: 0,
            exhausted: false,
        }
    }

    /// Line number of the most recently read line (1-based, 0 before any read).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Refills the line buffer. Returns `false` once the source is exhausted.
    fn fill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let mut raw = String::new();
        match self.source.read_line(&mut raw) {
            Ok(0) => {
                self.exhausted = true;
                self.buf.clear();
                self.pos = 0;
                Ok(false)
            }
            Ok(_) => {
                self.buf = raw.chars().collect();
                self.pos = 0;
                self.line += 1;
                Ok(true)
            }
            Err(e) => Err(Error::io(self.line + 1, &e)),
        }
    }

    fn token(&self, kind: TokenKind, col: usize) -> Token {
        Token {
            kind,
            line: self.line,
            col,
        }
    }

    /// Advances to and returns the next token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the source fails and [`Error::UnterminatedQuote`]
    /// when a quoted string reaches the end of its line. In the latter case the
    /// line end itself is still returned by the following call.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            if self.pos >= self.buf.len() && !self.fill()? {
                return Ok(self.token(TokenKind::Eof, self.pos + 1));
            }

            let start = self.pos;
            let ch = self.buf[start];
            match ch {
                '\n' => {
                    self.pos += 1;
                    return Ok(self.token(TokenKind::Eol, start + 1));
                }
                '\r' => {
                    self.pos += 1;
                    if self.buf.get(self.pos) == Some(&'\n') {
                        self.pos += 1;
                    }
                    return Ok(self.token(TokenKind::Eol, start + 1));
                }
                c if is_whitespace(c) => self.pos += 1,
                '%' => self.skip_to_line_end(),
                '"' | '\'' => return self.quoted(ch),
                '{' => {
                    self.pos += 1;
                    return Ok(self.token(TokenKind::OpenBrace, start + 1));
                }
                '}' => {
                    self.pos += 1;
                    return Ok(self.token(TokenKind::CloseBrace, start + 1));
                }
                _ => return Ok(self.word()),
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        while let Some(&c) = self.buf.get(self.pos) {
            if c == '\n' || c == '\r' {
                break;
            }
            self.pos += 1;
        }
    }

    fn quoted(&mut self, quote: char) -> Result<Token> {
        let col = self.pos + 1;
        self.pos += 1;
        let mut text = String::new();

        while let Some(&c) = self.buf.get(self.pos) {
            match c {
                c if c == quote => {
                    self.pos += 1;
                    return Ok(self.token(TokenKind::Quoted(text), col));
                }
                '\n' | '\r' => break,
                '\\' => match self.buf.get(self.pos + 1) {
                    Some(&next) if next == quote || next == '\\' => {
                        text.push(next);
                        self.pos += 2;
                    }
                    _ => {
                        text.push('\\');
                        self.pos += 1;
                    }
                },
                other => {
                    text.push(other);
                    self.pos += 1;
                }
            }
        }

        Err(Error::UnterminatedQuote {
            line: self.line,
            col,
        })
    }

    fn word(&mut self) -> Token {
        let start = self.pos;
        while let Some(&c) = self.buf.get(self.pos) {
            if ends_word(c) {
                break;
            }
            self.pos += 1;
        }
        let text: String = self.buf[start..self.pos].iter().collect();

        let kind = match parse_number(&text) {
            Some(value) => TokenKind::Number { value, text },
            None => TokenKind::Word(text),
        };
        self.token(kind, start + 1)
    }
}

fn is_whitespace(c: char) -> bool {
    c <= ' ' || c == ',' || c == '\u{feff}'
}

fn ends_word(c: char) -> bool {
    is_whitespace(c) || matches!(c, '{' | '}' | '%' | '"' | '\'')
}

/// Parses `text` as a plain decimal number.
///
/// Unlike `str::parse::<f64>`, words such as `inf` or `NaN` are not numbers here.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}
