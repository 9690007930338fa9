use super::Error;

/// Error when a caller passes a malformed argument.
///
/// This occurs when:
/// - A resolver receives an entity that is not an object
/// - A required name (model, relation, foreign key) is empty
/// - A filter option has the wrong shape (`limit` is not a number, `include`
///   has duplicates, etc.)
///
/// Arguments are validated before any query is issued.
#[derive(Debug)]
pub(super) struct InvalidArgument {
    message: Box<str>,
}

impl std::error::Error for InvalidArgument {}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgument {
            message: message.into().into(),
        }))
    }
}
