use super::Error;

/// Error when a row does not carry a column with the requested name.
///
/// The reconciliation engine treats this as "no comparable value" when
/// evaluating staleness, so it must stay distinguishable from other errors.
#[derive(Debug)]
pub(super) struct ColumnNotFound {
    column: Box<str>,
}

impl std::error::Error for ColumnNotFound {}

impl core::fmt::Display for ColumnNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "column not found: {}", self.column)
    }
}

impl Error {
    /// Creates a column-not-found error for the named column.
    pub fn column_not_found(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ColumnNotFound(ColumnNotFound {
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error (or its cause chain) is a missing column.
    pub fn is_column_not_found(&self) -> bool {
        self.any_in_chain(|kind| matches!(kind, super::ErrorKind::ColumnNotFound(_)))
    }
}
