use super::{Model, ModelDefinition, ModelDefinitionValidator, RelationsDefinitionValidator, Schema};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Collects model definitions and turns them into a validated [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<ModelDefinition>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: ModelDefinition) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut models = IndexMap::new();

        for definition in &self.models {
            ModelDefinitionValidator::validate(definition)?;

            if models.contains_key(&definition.name) {
                return Err(Error::invalid_definition(format!(
                    "The model {:?} is already defined.",
                    definition.name
                )));
            }

            let relations =
                RelationsDefinitionValidator::resolve(&definition.name, &definition.relations)?;

            models.insert(
                definition.name.clone(),
                Model {
                    name: definition.name.clone(),
                    base: definition.base.clone(),
                    datasource: definition.datasource.clone(),
                    properties: definition.properties.clone(),
                    relations,
                },
            );
        }

        let schema = Schema { models };
        schema.verify_bases()?;

        log::debug!("schema built; models={}", schema.models.len());
        Ok(schema)
    }
}

impl Schema {
    fn verify_bases(&self) -> Result<()> {
        for model in self.models.values() {
            if let Some(base) = &model.base {
                if !self.models.contains_key(base) {
                    return Err(Error::invalid_definition(format!(
                        "The base model {base:?} of the model {:?} is not defined.",
                        model.name
                    )));
                }
            }

            self.hierarchy(&model.name)
                .map_err(|err| Error::invalid_definition(err.to_string()))?;
        }

        Ok(())
    }
}
