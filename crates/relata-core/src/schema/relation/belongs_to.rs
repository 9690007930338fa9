/// The source entity holds a foreign key to one target entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelongsTo {
    pub target: BelongsToTarget,

    /// Source property holding the target id. Defaults to `<relation>Id`,
    /// or `<singular relation>Id` when polymorphic.
    pub foreign_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BelongsToTarget {
    Model(String),

    /// The target model name is stored on each entity in the
    /// `discriminator` property (default `<singular relation>Type`).
    Polymorphic { discriminator: Option<String> },
}

impl BelongsTo {
    pub fn model(&self) -> Option<&str> {
        match &self.target {
            BelongsToTarget::Model(model) => Some(model),
            BelongsToTarget::Polymorphic { .. } => None,
        }
    }

    pub fn is_polymorphic(&self) -> bool {
        matches!(self.target, BelongsToTarget::Polymorphic { .. })
    }

    pub fn discriminator(&self) -> Option<&str> {
        match &self.target {
            BelongsToTarget::Polymorphic { discriminator } => discriminator.as_deref(),
            BelongsToTarget::Model(_) => None,
        }
    }
}
