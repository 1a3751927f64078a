use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// A column reference, optionally resolved through a foreign lookup.
///
/// `local` names a column of the table being configured. When `foreign` is
/// set, `local` holds a foreign key and the value of interest is the column
/// `foreign` of the referenced table, reached through a join.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub local: String,
    pub foreign: Option<String>,
}

impl Field {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            foreign: None,
        }
    }

    pub fn foreign(local: impl Into<String>, foreign: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            foreign: Some(foreign.into()),
        }
    }

    pub fn is_foreign(&self) -> bool {
        self.foreign.is_some()
    }

    /// The name of the column actually queried: the foreign column if there
    /// is one, otherwise the local column.
    pub fn actual_name(&self) -> &str {
        self.foreign.as_deref().unwrap_or(&self.local)
    }

    /// The name this field's value is projected under in a result row.
    ///
    /// Foreign values are aliased to the full `local->foreign` token so they
    /// never collide with a native column of the same name.
    pub fn row_key(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut parts = s.split("->").map(str::trim);

        let local = parts.next().unwrap_or_default();
        let foreign = parts.next();

        if parts.next().is_some() {
            return Err(Error::invalid_config(s, "field has more than one `->`"));
        }

        if local.is_empty() {
            return Err(Error::invalid_config(s, "field has an empty local name"));
        }

        match foreign {
            Some("") => Err(Error::invalid_config(s, "field has an empty foreign name")),
            Some(foreign) => Ok(Field::foreign(local, foreign)),
            None => Ok(Field::new(local)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.foreign {
            Some(foreign) => write!(f, "{}->{}", self.local, foreign),
            None => f.write_str(&self.local),
        }
    }
}
