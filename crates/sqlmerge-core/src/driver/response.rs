use crate::{err, stmt::Row, Result};

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Query result rows, in the order the database returned them
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    /// Returns the affected-row count, or an error if the statement
    /// produced rows.
    pub fn into_count(self) -> Result<u64> {
        match self.rows {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => Err(err!("expected a row count, got result rows")),
        }
    }

    /// Returns the result rows, or an error if the statement only reported
    /// a count.
    pub fn into_rows(self) -> Result<Vec<Row>> {
        match self.rows {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(_) => Err(err!("expected result rows, got a row count")),
        }
    }

    /// Returns the first result row, if any.
    pub fn into_first(self) -> Result<Option<Row>> {
        Ok(self.into_rows()?.into_iter().next())
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }
}
