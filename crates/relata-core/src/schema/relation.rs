mod belongs_to;
pub use belongs_to::{BelongsTo, BelongsToTarget};

mod has_many;
pub use has_many::HasMany;

mod has_one;
pub use has_one::HasOne;

mod references_many;
pub use references_many::ReferencesMany;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    BelongsTo,
    HasOne,
    HasMany,
    ReferencesMany,
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationType::BelongsTo => "belongsTo",
            RelationType::HasOne => "hasOne",
            RelationType::HasMany => "hasMany",
            RelationType::ReferencesMany => "referencesMany",
        })
    }
}

/// The `polymorphic` option of a relation definition.
///
/// `Flag(true)` makes a relation polymorphic with explicit keys.
/// `Target(name)` (hasOne/hasMany only) names the polymorphic `belongsTo`
/// relation on the target model that the keys are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Polymorphic {
    Flag(bool),
    Target(String),
}

impl Default for Polymorphic {
    fn default() -> Polymorphic {
        Polymorphic::Flag(false)
    }
}

impl Polymorphic {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Polymorphic::Flag(false))
    }
}

/// Declarative relation definition, validated by
/// [`RelationsDefinitionValidator`](super::RelationsDefinitionValidator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDefinition {
    #[serde(rename = "type")]
    pub ty: RelationType,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub foreign_key: Option<String>,

    #[serde(default)]
    pub discriminator: Option<String>,

    #[serde(default)]
    pub polymorphic: Polymorphic,
}

impl RelationDefinition {
    pub fn new(ty: RelationType) -> RelationDefinition {
        RelationDefinition {
            ty,
            model: None,
            foreign_key: None,
            discriminator: None,
            polymorphic: Polymorphic::default(),
        }
    }

    pub fn belongs_to(model: impl Into<String>) -> RelationDefinition {
        RelationDefinition::new(RelationType::BelongsTo).model(model)
    }

    /// A `belongsTo` relation whose target model is read from the
    /// discriminator property of each entity.
    pub fn belongs_to_polymorphic() -> RelationDefinition {
        RelationDefinition::new(RelationType::BelongsTo).polymorphic(true)
    }

    pub fn has_one(model: impl Into<String>) -> RelationDefinition {
        RelationDefinition::new(RelationType::HasOne).model(model)
    }

    pub fn has_many(model: impl Into<String>) -> RelationDefinition {
        RelationDefinition::new(RelationType::HasMany).model(model)
    }

    pub fn references_many(model: impl Into<String>) -> RelationDefinition {
        RelationDefinition::new(RelationType::ReferencesMany).model(model)
    }

    pub fn model(mut self, model: impl Into<String>) -> RelationDefinition {
        self.model = Some(model.into());
        self
    }

    pub fn foreign_key(mut self, foreign_key: impl Into<String>) -> RelationDefinition {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    pub fn discriminator(mut self, discriminator: impl Into<String>) -> RelationDefinition {
        self.discriminator = Some(discriminator.into());
        self
    }

    pub fn polymorphic(mut self, polymorphic: bool) -> RelationDefinition {
        self.polymorphic = Polymorphic::Flag(polymorphic);
        self
    }

    /// Makes a hasOne/hasMany relation polymorphic, reading its keys from
    /// the `target_relation` belongsTo declared on the target model.
    pub fn polymorphic_by(mut self, target_relation: impl Into<String>) -> RelationDefinition {
        self.polymorphic = Polymorphic::Target(target_relation.into());
        self
    }
}

/// A validated relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    BelongsTo(BelongsTo),
    HasOne(HasOne),
    HasMany(HasMany),
    ReferencesMany(ReferencesMany),
}

/// How a hasOne/hasMany relation finds its dependents on the target model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependentLink {
    /// Targets whose `foreign_key` equals the source primary key
    ForeignKey(String),

    /// Like `ForeignKey`, and the target's `discriminator` must equal the
    /// source model name
    Polymorphic {
        foreign_key: String,
        discriminator: String,
    },

    /// Keys are taken from the named polymorphic belongsTo relation of the
    /// target model
    PolymorphicByRelation(String),
}

impl DependentLink {
    pub fn is_polymorphic(&self) -> bool {
        !matches!(self, DependentLink::ForeignKey(_))
    }
}

impl Relation {
    pub fn ty(&self) -> RelationType {
        match self {
            Relation::BelongsTo(_) => RelationType::BelongsTo,
            Relation::HasOne(_) => RelationType::HasOne,
            Relation::HasMany(_) => RelationType::HasMany,
            Relation::ReferencesMany(_) => RelationType::ReferencesMany,
        }
    }

    /// The target model name. `None` for a polymorphic belongsTo, whose
    /// target varies per entity.
    pub fn model(&self) -> Option<&str> {
        match self {
            Relation::BelongsTo(belongs_to) => belongs_to.model(),
            Relation::HasOne(has_one) => Some(&has_one.model),
            Relation::HasMany(has_many) => Some(&has_many.model),
            Relation::ReferencesMany(references_many) => Some(&references_many.model),
        }
    }

    pub fn is_polymorphic(&self) -> bool {
        match self {
            Relation::BelongsTo(belongs_to) => belongs_to.is_polymorphic(),
            Relation::HasOne(has_one) => has_one.link.is_polymorphic(),
            Relation::HasMany(has_many) => has_many.link.is_polymorphic(),
            Relation::ReferencesMany(_) => false,
        }
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Relation::BelongsTo(belongs_to) => Some(belongs_to),
            _ => None,
        }
    }
}
