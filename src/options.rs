//! Configuration options for ARFF reading.
//!
//! - [`ReaderOptions`]: Main configuration struct
//! - [`ClassSelector`]: Which attribute, if any, becomes the record label
//! - [`ShortRowPolicy`]: What to do with dense lines that carry too few values
//!
//! ## Examples
//!
//! ```rust
//! use arff_instances::{ArffReader, ClassSelector, ReaderOptions, ShortRowPolicy};
//!
//! let input = "@ATTRIBUTE a numeric\n@ATTRIBUTE b numeric\n@DATA\n1\n";
//! let options = ReaderOptions::new()
//!     .with_class(ClassSelector::None)
//!     .with_short_rows(ShortRowPolicy::ZeroFill);
//! let mut reader = ArffReader::with_options(input.as_bytes(), options).unwrap();
//! let record = reader.read_record().unwrap().unwrap();
//! assert_eq!(record.to_dense(), vec![1.0, 0.0]);
//! ```

use serde::{Deserialize, Serialize};

/// Selects the class (label) attribute of a relation.
///
/// The integer form follows the usual convention for stream loaders: a negative
/// value picks the last attribute, zero picks none, and a positive `n` picks the
/// `n`th attribute counting from one.
///
/// # Examples
///
/// ```rust
/// use arff_instances::ClassSelector;
///
/// assert_eq!(ClassSelector::from(-1), ClassSelector::Last);
/// assert_eq!(ClassSelector::from(0), ClassSelector::None);
/// assert_eq!(ClassSelector::from(3), ClassSelector::Index(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassSelector {
    /// Every attribute is an ordinary value.
    None,
    /// The last declared attribute is the class.
    #[default]
    Last,
    /// Zero-based attribute position of the class.
    Index(usize),
}

impl From<i32> for ClassSelector {
    fn from(selector: i32) -> Self {
        match selector {
            s if s < 0 => ClassSelector::Last,
            0 => ClassSelector::None,
            s => ClassSelector::Index((s - 1) as usize),
        }
    }
}

/// Policy for dense lines with fewer values than declared attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShortRowPolicy {
    /// Report a schema mismatch.
    #[default]
    Reject,
    /// Keep the record; unread positions stay `0.0`.
    ZeroFill,
}

/// Configuration options for an [`ArffReader`](crate::ArffReader).
///
/// # Examples
///
/// ```rust
/// use arff_instances::{ClassSelector, ReaderOptions};
///
/// let options = ReaderOptions::new()
///     .with_class(ClassSelector::from(-1))
///     .with_declared_record_count(1_000);
/// assert_eq!(options.class, ClassSelector::Last);
/// assert_eq!(options.declared_record_count, 1_000);
/// ```
#[derive(Clone, Debug)]
pub struct ReaderOptions {
    pub class: ClassSelector,
    pub declared_record_count: usize,
    pub short_rows: ShortRowPolicy,
    pub default_relation: String,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            class: ClassSelector::default(),
            declared_record_count: 0,
            short_rows: ShortRowPolicy::default(),
            default_relation: "file stream".to_string(),
        }
    }
}

impl ReaderOptions {
    /// Creates default options (last attribute is the class, short rows rejected).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arff_instances::{ReaderOptions, ShortRowPolicy};
    ///
    /// let options = ReaderOptions::new();
    /// assert_eq!(options.short_rows, ShortRowPolicy::Reject);
    /// assert_eq!(options.default_relation, "file stream");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class attribute selector.
    #[must_use]
    pub fn with_class(mut self, class: ClassSelector) -> Self {
        self.class = class;
        self
    }

    /// Sets the number of records the caller expects.
    ///
    /// Only used as a capacity hint by [`ArffReader::read_all`](crate::ArffReader::read_all).
    /// Large counts are clamped before anything is reserved.
    #[must_use]
    pub fn with_declared_record_count(mut self, count: usize) -> Self {
        self.declared_record_count = count;
        self
    }

    /// Sets the policy for dense lines that end early.
    #[must_use]
    pub fn with_short_rows(mut self, policy: ShortRowPolicy) -> Self {
        self.short_rows = policy;
        self
    }

    /// Sets the relation name used when the header has no `@RELATION`.
    #[must_use]
    pub fn with_default_relation(mut self, name: impl Into<String>) -> Self {
        self.default_relation = name.into();
        self
    }
}
