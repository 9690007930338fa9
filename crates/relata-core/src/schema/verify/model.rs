use super::{PropertiesDefinitionValidator, RelationsDefinitionValidator};
use crate::schema::ModelDefinition;
use crate::{Error, Result};

/// Validates a whole model definition: its own options, then its
/// properties and relations.
///
/// References to other models (`base`) are checked by the schema builder,
/// which sees every registered model.
pub struct ModelDefinitionValidator;

impl ModelDefinitionValidator {
    pub fn validate(model: &ModelDefinition) -> Result<()> {
        if model.name.is_empty() {
            return Err(Error::invalid_definition(
                "The model name should be a non-empty String, but \"\" was given.",
            ));
        }

        for (option, value) in [("datasource", &model.datasource), ("base", &model.base)] {
            if value.as_deref() == Some("") {
                return Err(Error::invalid_definition(format!(
                    "The model {:?} expects the option {option:?} to be a non-empty String, but \"\" was given.",
                    model.name
                )));
            }
        }

        if model.base.as_deref() == Some(model.name.as_str()) {
            return Err(Error::invalid_definition(format!(
                "The model {:?} cannot use itself as the base model.",
                model.name
            )));
        }

        PropertiesDefinitionValidator::validate(&model.name, &model.properties)?;
        RelationsDefinitionValidator::validate(&model.name, &model.relations)?;
        Ok(())
    }
}
