use super::Error;

#[derive(Debug)]
pub(super) struct InvalidReference {
    text: Box<str>,
}

impl std::error::Error for InvalidReference {}

impl core::fmt::Display for InvalidReference {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid reference `{}`: expected `table.field`", self.text)
    }
}

impl Error {
    pub fn invalid_reference(text: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidReference(InvalidReference {
            text: text.into().into(),
        }))
    }

    pub fn is_invalid_reference(&self) -> bool {
        self.any_in_chain(|kind| matches!(kind, super::ErrorKind::InvalidReference(_)))
    }
}
