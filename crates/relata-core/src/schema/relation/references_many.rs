/// The source entity holds an array of target ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencesMany {
    pub model: String,

    /// Source property holding the id array. Defaults to
    /// `<singular relation>Ids`.
    pub foreign_key: Option<String>,
}
