use super::present;
use crate::schema::{DataType, PropertyDefinition};
use crate::{Error, Result};

use indexmap::IndexMap;

pub struct PropertiesDefinitionValidator;

impl PropertiesDefinitionValidator {
    pub fn validate(
        model_name: &str,
        properties: &IndexMap<String, PropertyDefinition>,
    ) -> Result<()> {
        let mut primary_key: Option<&str> = None;

        for (name, property) in properties {
            Self::validate_property(model_name, name, property)?;

            if property.primary_key {
                if let Some(existing) = primary_key {
                    return Err(Error::invalid_definition(format!(
                        "The property {name:?} of the model {model_name:?} is defined as a primary key, but the model already has the primary key {existing:?}."
                    )));
                }
                primary_key = Some(name.as_str());
            }
        }

        Ok(())
    }

    fn validate_property(
        model_name: &str,
        name: &str,
        property: &PropertyDefinition,
    ) -> Result<()> {
        let fail = |message: String| Err(Error::invalid_definition(message));

        if name.is_empty() {
            return fail(format!(
                "The property name of the model {model_name:?} should be a non-empty String, but \"\" was given."
            ));
        }

        if property.item_type.is_some() && property.data_type != DataType::Array {
            return fail(format!(
                "The property {name:?} of the model {model_name:?} has the non-array type, so it should not have the option \"itemType\" to be provided."
            ));
        }

        if property.model.is_some() {
            let holds_objects = property.data_type == DataType::Object
                || (property.data_type == DataType::Array
                    && property.item_type == Some(DataType::Object));

            if !holds_objects {
                let ty = match property.item_type {
                    Some(item_type) => format!("{} of {item_type}", property.data_type),
                    None => property.data_type.to_string(),
                };
                return fail(format!(
                    "The option \"model\" is not supported for {ty:?} property type, so the property {name:?} of the model {model_name:?} should not have the option \"model\" to be provided."
                ));
            }

            if present(&property.model).is_none() {
                return fail(format!(
                    "The property {name:?} of the model {model_name:?} expects the option \"model\" to be a non-empty String, but \"\" was given."
                ));
            }
        }

        if property.column_name.as_deref() == Some("") {
            return fail(format!(
                "The property {name:?} of the model {model_name:?} expects the option \"columnName\" to be a non-empty String, but \"\" was given."
            ));
        }

        if property.primary_key {
            let options = [
                ("required", property.required),
                ("default", property.default.is_some()),
            ];

            for (option, given) in options {
                if given {
                    return fail(format!(
                        "The property {name:?} of the model {model_name:?} is a primary key, so it should not have the option {option:?} to be provided."
                    ));
                }
            }
        }

        if property.required && property.default.is_some() {
            return fail(format!(
                "The property {name:?} of the model {model_name:?} is a required property, so it should not have the option \"default\" to be provided."
            ));
        }

        Ok(())
    }
}
