use super::Error;

/// Error when a configuration entry cannot be turned into a table schema.
///
/// This occurs when:
/// - the entry has no `:` separating header and body, or more than one
/// - the table name is empty
/// - the body has fewer than six `;`-separated segments
/// - a field token is malformed (`->` with an empty side)
/// - a foreign field has no update reference to join through
///
/// The offending table is dropped from the active set; the rest of the
/// configuration still loads.
#[derive(Debug)]
pub(super) struct InvalidConfig {
    entry: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidConfig {}

impl core::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid configuration for `{}`: {}",
            self.entry, self.message
        )
    }
}

impl Error {
    /// Creates an invalid configuration error. `entry` names the table (or
    /// the raw entry text when no name could be parsed).
    pub fn invalid_config(entry: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfig(InvalidConfig {
            entry: entry.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid configuration error.
    pub fn is_invalid_config(&self) -> bool {
        self.any_in_chain(|kind| matches!(kind, super::ErrorKind::InvalidConfig(_)))
    }
}
