//! Attribute metadata for a relation.
//!
//! A [`Catalog`] is the ordered list of [`Attribute`]s declared in an ARFF
//! header, plus the relation name and the optional class attribute. It is built
//! once by the header parser and read by the record decoder thereafter.
//!
//! Nominal labels are kept in an [`IndexSet`]: positions are stable for the life
//! of the attribute and double as the ordinal value stored in records.
//!
//! ## Examples
//!
//! ```rust
//! use arff_instances::{Attribute, AttributeKind};
//!
//! let outlook = Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]).unwrap();
//! assert_eq!(outlook.kind(), AttributeKind::Nominal);
//! assert_eq!(outlook.index_of_value("overcast"), Some(1));
//! assert_eq!(outlook.index_of_value("snowy"), None);
//! ```

use crate::date::DatePattern;
use crate::{Error, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Kind of an attribute, also used as the per-position flag on records.
///
/// `Unset` only appears on records whose metadata was never recorded for a
/// position; catalog attributes are always one of the other three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeKind {
    #[default]
    Unset,
    Numeric,
    Nominal,
    Date,
}

/// A single declared attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    labels: IndexSet<String>,
    date_pattern: Option<DatePattern>,
}

impl Attribute {
    /// Creates a numeric attribute.
    #[must_use]
    pub fn numeric(name: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Numeric,
            labels: IndexSet::new(),
            date_pattern: None,
        }
    }

    /// Creates a nominal attribute whose labels keep their declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateLabel`] if a label is declared twice.
    pub fn nominal<I, S>(name: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut set = IndexSet::new();
        for label in labels {
            let label = label.into();
            if !set.insert(label.clone()) {
                return Err(Error::DuplicateLabel {
                    attribute: name,
                    label,
                });
            }
        }
        Ok(Attribute {
            name,
            kind: AttributeKind::Nominal,
            labels: set,
            date_pattern: None,
        })
    }

    /// Creates a date attribute with the given pattern.
    #[must_use]
    pub fn date(name: impl Into<String>, pattern: DatePattern) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Date,
            labels: IndexSet::new(),
            date_pattern: Some(pattern),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }

    #[must_use]
    pub fn is_nominal(&self) -> bool {
        self.kind == AttributeKind::Nominal
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        self.kind == AttributeKind::Date
    }

    /// Number of labels of a nominal attribute (zero otherwise).
    #[must_use]
    pub fn num_values(&self) -> usize {
        self.labels.len()
    }

    /// Ordinal position of `label`, or `None` if the attribute has no such label.
    #[must_use]
    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Label at ordinal position `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.labels.get_index(index).map(String::as_str)
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn date_pattern(&self) -> Option<&DatePattern> {
        self.date_pattern.as_ref()
    }
}

/// The relation name, its attributes, and the class attribute.
///
/// Record positions differ from attribute positions when a class attribute is
/// set: the class is diverted into the record label and takes no position, so
/// every attribute after it shifts down by one. [`Catalog::slot_of`] does that
/// mapping.
///
/// # Examples
///
/// ```rust
/// use arff_instances::{Attribute, Catalog};
///
/// let mut catalog = Catalog::new("weather");
/// catalog.push(Attribute::numeric("temp"));
/// catalog.push(Attribute::nominal("play", ["yes", "no"]).unwrap());
/// catalog.set_class_index(Some(1)).unwrap();
///
/// assert_eq!(catalog.num_attributes(), 2);
/// assert_eq!(catalog.num_record_attributes(), 1);
/// assert_eq!(catalog.slot_of(0), Some(0));
/// assert_eq!(catalog.slot_of(1), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
}

impl Catalog {
    #[must_use]
    pub fn new(relation: impl Into<String>) -> Self {
        Catalog {
            relation: relation.into(),
            attributes: Vec::new(),
            class_index: None,
        }
    }

    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn set_relation(&mut self, relation: impl Into<String>) {
        self.relation = relation.into();
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of declared attributes, the class attribute included.
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Number of positions a record carries: the class attribute excluded.
    #[must_use]
    pub fn num_record_attributes(&self) -> usize {
        self.attributes.len() - usize::from(self.class_index.is_some())
    }

    #[must_use]
    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    #[must_use]
    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.class_index.and_then(|i| self.attributes.get(i))
    }

    /// Sets or clears the class attribute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClassIndex`] if `index` is past the last attribute.
    pub fn set_class_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            if i >= self.attributes.len() {
                return Err(Error::InvalidClassIndex {
                    requested: i + 1,
                    available: self.attributes.len(),
                });
            }
        }
        self.class_index = index;
        Ok(())
    }

    /// Record position of attribute `index`, or `None` for the class attribute.
    #[must_use]
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        match self.class_index {
            Some(class) if index == class => None,
            Some(class) if index > class => Some(index - 1),
            _ => Some(index),
        }
    }
}
