//! Decoded records and their builders.
//!
//! A [`Record`] is either [`Dense`](Record::Dense), storing one value per
//! position, or [`Sparse`](Record::Sparse), storing only the positions that were
//! mentioned. Both carry a label, a weight, and an [`AttributeFlags`] table with
//! the [`AttributeKind`] of each position.
//!
//! Records are immutable. To change one, start a builder from it with
//! [`DenseRecordBuilder::from_record`] or [`SparseRecordBuilder::from_record`];
//! the builder owns independent copies of everything, so the source record is
//! never affected.
//!
//! ## Missing values and absent values
//!
//! A `?` in the data decodes to `NaN`. A position a sparse record never mentions
//! reads back as `0.0`, which is a value, not a missing one.
//!
//! ```rust
//! use arff_instances::{DenseRecordBuilder, SparseRecordBuilder};
//!
//! let dense = DenseRecordBuilder::new()
//!     .set_attributes(vec![f64::NAN, 2.0])
//!     .build();
//! assert!(dense.attribute(0).unwrap().is_nan());
//!
//! let sparse = SparseRecordBuilder::new()
//!     .num_attributes(2)
//!     .set_attribute(1, 2.0)
//!     .unwrap()
//!     .build();
//! assert_eq!(sparse.attribute(0), Some(0.0));
//! ```

use crate::attribute::AttributeKind;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Weight given to records whose builder never set one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Kind of each record position.
///
/// Positions past the end of the table read as [`AttributeKind::Unset`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFlags(Vec<AttributeKind>);

impl AttributeFlags {
    /// A table of `len` unset positions.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        AttributeFlags(vec![AttributeKind::Unset; len])
    }

    #[must_use]
    pub fn kind(&self, index: usize) -> AttributeKind {
        self.0.get(index).copied().unwrap_or_default()
    }

    /// Sets the kind at `index`, growing the table if needed.
    pub fn set(&mut self, index: usize, kind: AttributeKind) {
        if index >= self.0.len() {
            self.0.resize(index + 1, AttributeKind::Unset);
        }
        self.0[index] = kind;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Forgets every position at or past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collapses three independent flags into one kind.
///
/// # Errors
///
/// Returns [`Error::ContradictoryMetadata`] if more than one flag is set.
pub fn kind_from_flags(
    index: usize,
    is_numeric: bool,
    is_nominal: bool,
    is_date: bool,
) -> Result<AttributeKind> {
    match (is_numeric, is_nominal, is_date) {
        (false, false, false) => Ok(AttributeKind::Unset),
        (true, false, false) => Ok(AttributeKind::Numeric),
        (false, true, false) => Ok(AttributeKind::Nominal),
        (false, false, true) => Ok(AttributeKind::Date),
        _ => Err(Error::ContradictoryMetadata { index }),
    }
}

/// A record storing one value per position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseRecord {
    values: Vec<f64>,
    label: f64,
    weight: f64,
    flags: AttributeFlags,
}

impl DenseRecord {
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn label(&self) -> f64 {
        self.label
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn flags(&self) -> &AttributeFlags {
        &self.flags
    }
}

/// A record storing only the positions that were given a value.
///
/// `num_attributes` is the declared width and may exceed the number of stored
/// entries. Entries keep the order they were set in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SparseRecord {
    values: IndexMap<usize, f64>,
    num_attributes: usize,
    label: f64,
    weight: f64,
    flags: AttributeFlags,
}

impl SparseRecord {
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.num_attributes
    }

    /// Value at `index`; positions never set read as `0.0`.
    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<f64> {
        if index >= self.num_attributes {
            return None;
        }
        Some(self.values.get(&index).copied().unwrap_or(0.0))
    }

    /// Stored `(position, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().map(|(&i, &v)| (i, v))
    }

    /// Number of stored entries.
    #[must_use]
    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn label(&self) -> f64 {
        self.label
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn flags(&self) -> &AttributeFlags {
        &self.flags
    }

    /// Full-width projection with `0.0` for unset positions.
    #[must_use]
    pub fn to_dense(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.num_attributes];
        for (&i, &v) in &self.values {
            if let Some(slot) = out.get_mut(i) {
                *slot = v;
            }
        }
        out
    }
}

/// One decoded data line.
///
/// # Examples
///
/// ```rust
/// use arff_instances::{Record, SparseRecordBuilder};
///
/// let record = Record::Sparse(
///     SparseRecordBuilder::new()
///         .num_attributes(3)
///         .set_attribute(1, 5.0)
///         .unwrap()
///         .build(),
/// );
/// assert_eq!(record.num_attributes(), 3);
/// assert_eq!(record.to_dense(), vec![0.0, 5.0, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Dense(DenseRecord),
    Sparse(SparseRecord),
}

impl Record {
    #[must_use]
    pub fn label(&self) -> f64 {
        match self {
            Record::Dense(r) => r.label,
            Record::Sparse(r) => r.label,
        }
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        match self {
            Record::Dense(r) => r.weight,
            Record::Sparse(r) => r.weight,
        }
    }

    #[must_use]
    pub fn num_attributes(&self) -> usize {
        match self {
            Record::Dense(r) => r.num_attributes(),
            Record::Sparse(r) => r.num_attributes(),
        }
    }

    /// Value at `index`, or `None` past the record's width.
    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<f64> {
        match self {
            Record::Dense(r) => r.attribute(index),
            Record::Sparse(r) => r.attribute(index),
        }
    }

    /// `true` if the value at `index` was given as `?`.
    #[must_use]
    pub fn is_missing(&self, index: usize) -> bool {
        self.attribute(index).is_some_and(f64::is_nan)
    }

    /// All positions as a dense vector.
    #[must_use]
    pub fn to_dense(&self) -> Vec<f64> {
        match self {
            Record::Dense(r) => r.values.clone(),
            Record::Sparse(r) => r.to_dense(),
        }
    }

    #[must_use]
    pub fn flags(&self) -> &AttributeFlags {
        match self {
            Record::Dense(r) => &r.flags,
            Record::Sparse(r) => &r.flags,
        }
    }

    #[must_use]
    pub fn kind(&self, index: usize) -> AttributeKind {
        self.flags().kind(index)
    }

    #[must_use]
    pub fn is_numeric(&self, index: usize) -> bool {
        self.kind(index) == AttributeKind::Numeric
    }

    #[must_use]
    pub fn is_nominal(&self, index: usize) -> bool {
        self.kind(index) == AttributeKind::Nominal
    }

    #[must_use]
    pub fn is_date(&self, index: usize) -> bool {
        self.kind(index) == AttributeKind::Date
    }

    #[must_use]
    pub fn is_sparse(&self) -> bool {
        matches!(self, Record::Sparse(_))
    }

    #[must_use]
    pub fn as_dense(&self) -> Option<&DenseRecord> {
        match self {
            Record::Dense(r) => Some(r),
            Record::Sparse(_) => None,
        }
    }

    #[must_use]
    pub fn as_sparse(&self) -> Option<&SparseRecord> {
        match self {
            Record::Sparse(r) => Some(r),
            Record::Dense(_) => None,
        }
    }
}

impl From<DenseRecord> for Record {
    fn from(record: DenseRecord) -> Self {
        Record::Dense(record)
    }
}

impl From<SparseRecord> for Record {
    fn from(record: SparseRecord) -> Self {
        Record::Sparse(record)
    }
}

/// Scratch state for one [`DenseRecord`].
///
/// # Examples
///
/// ```rust
/// use arff_instances::DenseRecordBuilder;
///
/// let original = DenseRecordBuilder::new()
///     .set_attributes(vec![1.0, 2.0, 3.0])
///     .build();
///
/// let copy = DenseRecordBuilder::from_record(&original)
///     .set_attribute(0, 9.0)
///     .unwrap()
///     .build();
///
/// assert_eq!(original.attribute(0), Some(1.0));
/// assert_eq!(copy.attribute(0), Some(9.0));
/// ```
#[derive(Clone, Debug)]
pub struct DenseRecordBuilder {
    values: Vec<f64>,
    label: f64,
    weight: f64,
    flags: AttributeFlags,
}

impl Default for DenseRecordBuilder {
    fn default() -> Self {
        DenseRecordBuilder {
            values: Vec::new(),
            label: 0.0,
            weight: DEFAULT_WEIGHT,
            flags: AttributeFlags::default(),
        }
    }
}

impl DenseRecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder holding an independent copy of `record`.
    #[must_use]
    pub fn from_record(record: &DenseRecord) -> Self {
        let mut builder = Self::new();
        builder.set_attributes(record.values.clone());
        for i in 0..record.values.len() {
            builder.flags.set(i, record.flags.kind(i));
        }
        builder.set_label(record.label).set_weight(record.weight);
        builder
    }

    pub fn set_label(&mut self, label: f64) -> &mut Self {
        self.label = label;
        self
    }

    pub fn set_weight(&mut self, weight: f64) -> &mut Self {
        self.weight = weight;
        self
    }

    /// Replaces every value and resets the kind of each position to unset.
    pub fn set_attributes(&mut self, values: Vec<f64>) -> &mut Self {
        self.flags = AttributeFlags::with_len(values.len());
        self.values = values;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::AttributeOutOfRange`] past the width set by
    /// [`set_attributes`](Self::set_attributes).
    pub fn set_attribute(&mut self, index: usize, value: f64) -> Result<&mut Self> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Error::AttributeOutOfRange { index, len })?;
        *slot = value;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`Error::AttributeOutOfRange`] past the record width.
    pub fn set_attribute_kind(&mut self, index: usize, kind: AttributeKind) -> Result<&mut Self> {
        if index >= self.values.len() {
            return Err(Error::AttributeOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        self.flags.set(index, kind);
        Ok(self)
    }

    /// Flag-style form of [`set_attribute_kind`](Self::set_attribute_kind).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContradictoryMetadata`] if more than one flag is set, or
    /// [`Error::AttributeOutOfRange`] past the record width.
    pub fn set_attribute_metadata(
        &mut self,
        index: usize,
        is_numeric: bool,
        is_nominal: bool,
        is_date: bool,
    ) -> Result<&mut Self> {
        let kind = kind_from_flags(index, is_numeric, is_nominal, is_date)?;
        self.set_attribute_kind(index, kind)
    }

    #[must_use]
    pub fn build(&self) -> DenseRecord {
        DenseRecord {
            values: self.values.clone(),
            label: self.label,
            weight: self.weight,
            flags: self.flags.clone(),
        }
    }
}

/// Scratch state for one [`SparseRecord`].
///
/// Set the width with [`num_attributes`](Self::num_attributes) before adding
/// values; positions at or past it are rejected.
#[derive(Clone, Debug)]
pub struct SparseRecordBuilder {
    values: IndexMap<usize, f64>,
    num_attributes: usize,
    label: f64,
    weight: f64,
    flags: AttributeFlags,
}

impl Default for SparseRecordBuilder {
    fn default() -> Self {
        SparseRecordBuilder {
            values: IndexMap::new(),
            num_attributes: 0,
            label: 0.0,
            weight: DEFAULT_WEIGHT,
            flags: AttributeFlags::default(),
        }
    }
}

impl SparseRecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder holding an independent copy of `record`.
    ///
    /// Stored entries are replayed as-is, so the copy stays sparse.
    #[must_use]
    pub fn from_record(record: &SparseRecord) -> Self {
        let mut builder = Self::new();
        builder.num_attributes(record.num_attributes);
        builder.values = record.values.clone();
        for i in 0..record.num_attributes {
            builder.flags.set(i, record.flags.kind(i));
        }
        builder.set_label(record.label).set_weight(record.weight);
        builder
    }

    /// Sets the declared width. Entries and kinds at or past `num` are dropped.
    pub fn num_attributes(&mut self, num: usize) -> &mut Self {
        self.num_attributes = num;
        self.values.retain(|&i, _| i < num);
        self.flags.truncate(num);
        self
    }

    pub fn set_label(&mut self, label: f64) -> &mut Self {
        self.label = label;
        self
    }

    pub fn set_weight(&mut self, weight: f64) -> &mut Self {
        self.weight = weight;
        self
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.num_attributes {
            return Err(Error::AttributeOutOfRange {
                index,
                len: self.num_attributes,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::AttributeOutOfRange`] at or past the declared width.
    pub fn set_attribute(&mut self, index: usize, value: f64) -> Result<&mut Self> {
        self.check(index)?;
        self.values.insert(index, value);
        Ok(self)
    }

    /// Adds several `(position, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeOutOfRange`] for the first pair past the width;
    /// pairs before it are kept.
    pub fn add_attributes<I>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        for (index, value) in entries {
            self.set_attribute(index, value)?;
        }
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`Error::AttributeOutOfRange`] at or past the declared width.
    pub fn set_attribute_kind(&mut self, index: usize, kind: AttributeKind) -> Result<&mut Self> {
        self.check(index)?;
        self.flags.set(index, kind);
        Ok(self)
    }

    /// Flag-style form of [`set_attribute_kind`](Self::set_attribute_kind).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContradictoryMetadata`] if more than one flag is set, or
    /// [`Error::AttributeOutOfRange`] past the declared width.
    pub fn set_attribute_metadata(
        &mut self,
        index: usize,
        is_numeric: bool,
        is_nominal: bool,
        is_date: bool,
    ) -> Result<&mut Self> {
        let kind = kind_from_flags(index, is_numeric, is_nominal, is_date)?;
        self.set_attribute_kind(index, kind)
    }

    #[must_use]
    pub fn build(&self) -> SparseRecord {
        SparseRecord {
            values: self.values.clone(),
            num_attributes: self.num_attributes,
            label: self.label,
            weight: self.weight,
            flags: self.flags.clone(),
        }
    }
}
