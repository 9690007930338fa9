use super::Error;

/// Error when a model name is not registered in the schema.
#[derive(Debug)]
pub(super) struct ModelNotDefined {
    model: Box<str>,
}

impl std::error::Error for ModelNotDefined {}

impl core::fmt::Display for ModelNotDefined {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "The model {:?} is not defined.", self.model)
    }
}

impl Error {
    /// Creates a model not defined error.
    pub fn model_not_defined(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ModelNotDefined(ModelNotDefined {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a model not defined error.
    pub fn is_model_not_defined(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModelNotDefined(_))
    }
}
