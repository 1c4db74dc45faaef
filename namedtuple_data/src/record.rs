use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use serde::Serialize;

/// Type name shown when a record is displayed.
pub const RECORD_TYPE_NAME: &str = "NamedTuple";

/// Error raised when a set of field names cannot be paired with a set of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    LengthMismatch { values: usize, names: usize },
    DuplicateField { name: String, first: usize, second: usize },
    InvalidField { index: usize, name: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::LengthMismatch { values, names } => write!(
                f,
                "length of values and attribute names must be equal: values length = {values}, attribute names length = {names}"
            ),
            RecordError::DuplicateField { name, first, second } => {
                write!(f, "duplicate field name '{name}' at positions {first} and {second}")
            },
            RecordError::InvalidField { index, name } => {
                write!(f, "invalid field name '{name}' at position {index}")
            },
        }
    }
}

impl std::error::Error for RecordError {}

/// Immutable, order-preserving record of named values.
///
/// Fields keep the order they were constructed in. There is no way to add,
/// remove, or replace a field once the record exists.
///
/// ```
/// use namedtuple_data::NamedRecord;
///
/// let record = NamedRecord::new(vec!["a".into(), "b".into()], vec![1, 2]).unwrap();
/// assert_eq!(record["b"], 2);
/// assert_eq!(record[0], 1);
/// assert_eq!(record.to_string(), "NamedTuple(a=1, b=2)");
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NamedRecord<V> {
    fields: IndexMap<String, V>,
}

impl<V> NamedRecord<V> {
    /// Pair `names` with `values` position by position.
    ///
    /// # Errors
    /// Returns [`RecordError::LengthMismatch`] when the two sequences differ in length,
    /// [`RecordError::InvalidField`] for a blank name or one containing whitespace, and
    /// [`RecordError::DuplicateField`] when a name repeats.
    pub fn new(names: Vec<String>, values: Vec<V>) -> Result<Self, RecordError> {
        if names.len() != values.len() {
            return Err(RecordError::LengthMismatch {
                values: values.len(),
                names: names.len(),
            });
        }

        let mut fields = IndexMap::with_capacity(names.len());
        for (index, (name, value)) in names.into_iter().zip(values).enumerate() {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(RecordError::InvalidField { index, name });
            }
            if let Some(first) = fields.get_index_of(&name) {
                return Err(RecordError::DuplicateField {
                    name,
                    first,
                    second: index,
                });
            }
            fields.insert(name, value);
        }

        Ok(Self { fields })
    }

    /// Field names in positional order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.fields.get(name)
    }

    /// Value at `position`, if the record has that many fields.
    pub fn get_index(&self, position: usize) -> Option<&V> {
        self.fields.get_index(position).map(|(_, value)| value)
    }

    /// Position of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in positional order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.fields.values()
    }

    /// Read-only mapping view of the record.
    pub fn as_map(&self) -> &IndexMap<String, V> {
        &self.fields
    }

    /// Copy the record into an owned, ordered map.
    pub fn to_map(&self) -> IndexMap<String, V>
    where
        V: Clone,
    {
        self.fields.clone()
    }

    pub fn into_values(self) -> Vec<V> {
        self.fields.into_values().collect()
    }
}

impl<V: PartialEq> PartialEq for NamedRecord<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for NamedRecord<V> {}

impl<V> Index<&str> for NamedRecord<V> {
    type Output = V;

    fn index(&self, name: &str) -> &V {
        match self.fields.get(name) {
            Some(value) => value,
            None => panic!("{RECORD_TYPE_NAME} has no field named '{name}'"),
        }
    }
}

impl<V> Index<usize> for NamedRecord<V> {
    type Output = V;

    fn index(&self, position: usize) -> &V {
        match self.get_index(position) {
            Some(value) => value,
            None => panic!("{RECORD_TYPE_NAME} index {position} out of range for {} fields", self.len()),
        }
    }
}

impl<'a, V> IntoIterator for &'a NamedRecord<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<V: fmt::Display> fmt::Display for NamedRecord<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RECORD_TYPE_NAME}(")?;
        for (position, (name, value)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}
