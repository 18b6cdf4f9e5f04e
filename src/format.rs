//! The ARFF dialect accepted by this crate.
//!
//! # Overview
//!
//! An ARFF file is a header followed by a data section. Both are line-oriented:
//! line ends are significant, blank lines are ignored, and `%` starts a comment
//! that runs to the end of the line.
//!
//! ```text
//! % comment
//! @RELATION weather
//!
//! @ATTRIBUTE outlook {sunny, overcast, rainy}
//! @ATTRIBUTE temperature NUMERIC
//! @ATTRIBUTE observed DATE "yyyy-MM-dd"
//! @ATTRIBUTE play {yes, no}
//!
//! @DATA
//! sunny, 85, 2024-06-01, no
//! {1 64, 3 yes}
//! overcast, ?, 2024-06-03, yes, {0.5}
//! ```
//!
//! # Lexical Rules
//!
//! | Input | Meaning |
//! |-------|---------|
//! | any character up to and including space | whitespace |
//! | `,` | whitespace |
//! | `%` | comment to end of line |
//! | `"..."` or `'...'` | quoted string; `\` escapes only the quote character or itself |
//! | `{` and `}` | structural tokens |
//! | anything else | a word; a number if it reads as a plain decimal |
//!
//! Because commas are whitespace, `1,2,3` and `1 2 3` are the same line. A quoted
//! string must close on the line it opened.
//!
//! # Header
//!
//! Directive keywords are case-insensitive. Unknown directives are skipped up
//! to the end of their line.
//!
//! - `@RELATION <name>` sets the relation name (default `file stream`).
//! - `@ATTRIBUTE <name> <type>` declares the next attribute:
//!   - `NUMERIC`, `REAL`, `INTEGER`: numeric
//!   - `DATE ["<pattern>"]`: date, default pattern `yyyy-MM-dd'T'HH:mm:ss`
//!   - `{label, label, ...}`: nominal, ordinals follow declaration order
//!   - any other keyword is read as numeric and logged at `warn`
//! - `@DATA` ends the header.
//!
//! # Data Lines
//!
//! ## Dense
//!
//! One value per declared attribute, in declaration order:
//!
//! | Token | Numeric attribute | Nominal attribute | Date attribute |
//! |-------|-------------------|-------------------|----------------|
//! | `?` | `NaN` | `NaN` | `NaN` |
//! | number | the number | ordinal of the matching label | parsed by pattern, else the number |
//! | word or quoted | parsed as a plain decimal (`inf` and `NaN` are rejected) | ordinal of the label | milliseconds since the epoch |
//!
//! A numeric literal matches a nominal label if the label has the same text, or
//! the canonical decimal text (`1` matches `1.0`), or reads as the same number.
//!
//! A line with fewer values than attributes is rejected unless the reader uses
//! [`ShortRowPolicy::ZeroFill`](crate::ShortRowPolicy::ZeroFill). A line with
//! more values is always rejected.
//!
//! ## Sparse
//!
//! `{index value, index value, ...}` with zero-based attribute indices. Values
//! follow the dense rules for the attribute at `index`. Positions never listed
//! read back as `0.0`, not as missing.
//!
//! ## Weights
//!
//! Either shape may end with `{w}` to give the record weight `w`. Records
//! without one have weight `1.0`.
//!
//! # Class Attribute
//!
//! When a class attribute is selected its value becomes the record label and it
//! takes no position in the record, so a relation with `n` attributes produces
//! records of width `n - 1`. Positions after the class shift down by one; this
//! applies to sparse indices too.
