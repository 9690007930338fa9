use super::DependentLink;

/// The target model holds a foreign key back to the source; every matching
/// target is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasMany {
    pub model: String,
    pub link: DependentLink,
}
