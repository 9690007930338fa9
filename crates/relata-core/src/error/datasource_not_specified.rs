use super::Error;

/// Error when a model is registered without a datasource, so no repository
/// can be built for it.
#[derive(Debug)]
pub(super) struct DatasourceNotSpecified {
    model: Box<str>,
}

impl std::error::Error for DatasourceNotSpecified {}

impl core::fmt::Display for DatasourceNotSpecified {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "The model {:?} does not have a specified datasource.",
            self.model
        )
    }
}

impl Error {
    /// Creates a datasource not specified error.
    pub fn datasource_not_specified(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DatasourceNotSpecified(
            DatasourceNotSpecified {
                model: model.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a datasource not specified error.
    pub fn is_datasource_not_specified(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DatasourceNotSpecified(_))
    }
}
