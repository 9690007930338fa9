use super::Error;

/// Error when a model, property or relation definition is inconsistent.
///
/// These are raised while the schema is built, never during relation
/// resolution.
#[derive(Debug)]
pub(super) struct InvalidDefinition {
    message: Box<str>,
}

impl std::error::Error for InvalidDefinition {}

impl core::fmt::Display for InvalidDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an invalid definition error.
    pub fn invalid_definition(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDefinition(InvalidDefinition {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid definition error.
    pub fn is_invalid_definition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidDefinition(_))
    }
}
