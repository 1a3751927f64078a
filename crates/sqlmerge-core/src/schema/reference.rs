use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// A `table.field` pointer.
///
/// Used both for dependent tables (rows of `table` whose `field` matches the
/// parent are deleted on replacement) and for foreign-key update fields
/// (values are secondary keys of `table`, joined on `field`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub table: String,
    pub field: String,
}

impl Reference {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
        }
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut parts = s.split('.').map(str::trim);

        match (parts.next(), parts.next(), parts.next()) {
            (Some(table), Some(field), None) if !table.is_empty() && !field.is_empty() => {
                Ok(Reference::new(table, field))
            }
            _ => Err(Error::invalid_reference(s)),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.field)
    }
}
