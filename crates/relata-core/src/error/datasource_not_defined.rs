use super::Error;

/// Error when a model names a datasource that was never registered.
#[derive(Debug)]
pub(super) struct DatasourceNotDefined {
    datasource: Box<str>,
}

impl std::error::Error for DatasourceNotDefined {}

impl core::fmt::Display for DatasourceNotDefined {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "The datasource {:?} is not defined.", self.datasource)
    }
}

impl Error {
    /// Creates a datasource not defined error.
    pub fn datasource_not_defined(datasource: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DatasourceNotDefined(DatasourceNotDefined {
            datasource: datasource.into().into(),
        }))
    }

    /// Returns `true` if this error is a datasource not defined error.
    pub fn is_datasource_not_defined(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DatasourceNotDefined(_))
    }
}
