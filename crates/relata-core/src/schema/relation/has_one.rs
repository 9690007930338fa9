use super::DependentLink;

/// The target model holds a foreign key back to the source; at most one
/// target is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasOne {
    pub model: String,
    pub link: DependentLink,
}
