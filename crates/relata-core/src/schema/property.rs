use crate::stmt::Value;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Any,
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::Any => "any",
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Array => "array",
            DataType::Object => "object",
        })
    }
}

/// Declarative definition of a model property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Element type of an `array` property
    pub item_type: Option<DataType>,

    /// Embedded model of an `object` property (or of `array` items)
    pub model: Option<String>,

    pub primary_key: bool,

    /// Storage name, when it differs from the property name
    pub column_name: Option<String>,

    pub required: bool,

    pub default: Option<Value>,
}

impl PropertyDefinition {
    pub fn new(data_type: DataType) -> PropertyDefinition {
        PropertyDefinition {
            data_type,
            ..PropertyDefinition::default()
        }
    }

    pub fn item_type(mut self, item_type: DataType) -> PropertyDefinition {
        self.item_type = Some(item_type);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> PropertyDefinition {
        self.model = Some(model.into());
        self
    }

    pub fn primary_key(mut self) -> PropertyDefinition {
        self.primary_key = true;
        self
    }

    pub fn column_name(mut self, column_name: impl Into<String>) -> PropertyDefinition {
        self.column_name = Some(column_name.into());
        self
    }

    pub fn required(mut self) -> PropertyDefinition {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> PropertyDefinition {
        self.default = Some(value.into());
        self
    }
}

impl From<DataType> for PropertyDefinition {
    fn from(data_type: DataType) -> PropertyDefinition {
        PropertyDefinition::new(data_type)
    }
}
