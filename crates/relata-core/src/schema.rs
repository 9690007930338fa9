mod builder;
pub use builder::Builder;

mod model;
pub use model::{Model, ModelDefinition};

mod property;
pub use property::{DataType, PropertyDefinition};

mod relation;
pub use relation::{
    BelongsTo, BelongsToTarget, DependentLink, HasMany, HasOne, Polymorphic, ReferencesMany,
    Relation, RelationDefinition, RelationType,
};

mod verify;
pub use verify::{
    ModelDefinitionValidator, PropertiesDefinitionValidator, RelationsDefinitionValidator,
};

use crate::{Error, Result};
use indexmap::IndexMap;

/// Primary key property used when a model does not declare one.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Registry of validated models.
///
/// Answers the metadata questions asked during relation resolution:
/// primary key names, relation lookup and base-model inheritance.
#[derive(Debug, Default)]
pub struct Schema {
    models: IndexMap<String, Model>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Get a model by name
    pub fn model(&self, name: &str) -> Result<&Model> {
        self.models
            .get(name)
            .ok_or_else(|| Error::model_not_defined(name))
    }

    /// The model followed by its base models, nearest first.
    pub fn hierarchy(&self, name: &str) -> Result<Vec<&Model>> {
        let mut chain = vec![self.model(name)?];

        while let Some(base) = chain.last().copied().and_then(|model| model.base.as_deref()) {
            let base = self.model(base)?;
            if chain.iter().any(|model| model.name == base.name) {
                crate::bail!("The model {name:?} has a circular base model chain.");
            }
            chain.push(base);
        }

        Ok(chain)
    }

    /// Properties of the model merged with those of its base models. A
    /// property redeclared on a derived model replaces the base one.
    pub fn properties_in_hierarchy(
        &self,
        name: &str,
    ) -> Result<IndexMap<String, PropertyDefinition>> {
        let mut properties = IndexMap::new();

        for model in self.hierarchy(name)?.into_iter().rev() {
            for (property, definition) in &model.properties {
                properties.insert(property.clone(), definition.clone());
            }
        }

        Ok(properties)
    }

    /// Relations of the model merged with those of its base models.
    pub fn relations_in_hierarchy(&self, name: &str) -> Result<IndexMap<String, Relation>> {
        let mut relations = IndexMap::new();

        for model in self.hierarchy(name)?.into_iter().rev() {
            for (relation, definition) in &model.relations {
                relations.insert(relation.clone(), definition.clone());
            }
        }

        Ok(relations)
    }

    /// Looks up a relation by name on the model or its base models.
    pub fn relation_definition(&self, model: &str, relation: &str) -> Result<&Relation> {
        self.hierarchy(model)?
            .into_iter()
            .find_map(|model| model.relations.get(relation))
            .ok_or_else(|| Error::relation_not_defined(model, relation))
    }

    /// Name of the primary key property.
    ///
    /// Falls back to `"id"` when no property is flagged as the primary key,
    /// unless `id` is declared as a regular property.
    pub fn primary_key_property_name(&self, model: &str) -> Result<String> {
        let properties = self.properties_in_hierarchy(model)?;

        let mut keys = properties
            .iter()
            .filter(|(_, property)| property.primary_key)
            .map(|(name, _)| name);

        match (keys.next(), keys.next()) {
            (Some(name), None) => Ok(name.clone()),
            (Some(first), Some(second)) => Err(Error::invalid_definition(format!(
                "The model {model:?} has more than one primary key: {first:?} and {second:?}."
            ))),
            (None, _) if properties.contains_key(DEFAULT_PRIMARY_KEY) => {
                Err(Error::invalid_definition(format!(
                    "The property name {DEFAULT_PRIMARY_KEY:?} of the model {model:?} is defined as a regular property. In this case, a primary key should be defined explicitly. Do use the option \"primaryKey\" to specify the primary key."
                )))
            }
            (None, _) => Ok(DEFAULT_PRIMARY_KEY.to_string()),
        }
    }

    /// Name of the datasource serving the model, inherited from the base
    /// chain when the model does not set one.
    pub fn datasource_name(&self, model: &str) -> Result<Option<&str>> {
        Ok(self
            .hierarchy(model)?
            .into_iter()
            .find_map(|model| model.datasource.as_deref()))
    }
}
