use super::Error;

/// Error when a relation name is looked up on a model that does not declare
/// it (including its base models).
#[derive(Debug)]
pub(super) struct RelationNotDefined {
    model: Box<str>,
    relation: Box<str>,
}

impl std::error::Error for RelationNotDefined {}

impl core::fmt::Display for RelationNotDefined {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "The model {:?} does not have relation name {:?}.",
            self.model, self.relation
        )
    }
}

impl Error {
    /// Creates a relation not defined error.
    pub fn relation_not_defined(model: impl Into<String>, relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RelationNotDefined(RelationNotDefined {
            model: model.into().into(),
            relation: relation.into().into(),
        }))
    }

    /// Returns `true` if this error is a relation not defined error.
    pub fn is_relation_not_defined(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RelationNotDefined(_))
    }
}
