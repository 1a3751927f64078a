use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::{stmt::Value, Error, Result};

/// A result row: column names in projection order mapped to their values.
///
/// Getters fail with [`Error::column_not_found`] when the row has no column
/// by that name, which callers can tell apart from a value that is present
/// but of the wrong type.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(name, value)` pairs. When a name repeats, the
    /// later value replaces the earlier one but keeps its position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut row = Row::new();
        for (name, value) in pairs {
            row.insert(name, value);
        }
        row
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::column_not_found(name))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        let value = self.get(name)?;
        value
            .as_i64()
            .ok_or_else(|| Error::type_conversion(value.clone(), "i64"))
    }

    /// Reads the column as text. Numbers are rendered in decimal; nulls are
    /// a type conversion error.
    pub fn get_text(&self, name: &str) -> Result<String> {
        let value = self.get(name)?;
        value
            .to_text()
            .ok_or_else(|| Error::type_conversion(value.clone(), "String"))
    }

    pub fn get_datetime(&self, name: &str) -> Result<NaiveDateTime> {
        self.get(name)?.to_datetime()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Row::from_pairs(iter)
    }
}
