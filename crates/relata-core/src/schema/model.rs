use super::{PropertyDefinition, Relation, RelationDefinition, RelationType};
use crate::{
    stmt::{Repr, Value},
    Error, Result,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarative definition of a model, as registered with
/// [`Builder`](super::Builder).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelDefinition {
    pub name: String,

    /// Model whose properties and relations this one inherits
    pub base: Option<String>,

    /// Name of the datasource the model's repository reads from
    pub datasource: Option<String>,

    pub properties: IndexMap<String, PropertyDefinition>,

    pub relations: IndexMap<String, RelationDefinition>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>) -> ModelDefinition {
        ModelDefinition {
            name: name.into(),
            ..ModelDefinition::default()
        }
    }

    pub fn base(mut self, base: impl Into<String>) -> ModelDefinition {
        self.base = Some(base.into());
        self
    }

    pub fn datasource(mut self, datasource: impl Into<String>) -> ModelDefinition {
        self.datasource = Some(datasource.into());
        self
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        property: impl Into<PropertyDefinition>,
    ) -> ModelDefinition {
        self.properties.insert(name.into(), property.into());
        self
    }

    pub fn relation(
        mut self,
        name: impl Into<String>,
        relation: RelationDefinition,
    ) -> ModelDefinition {
        self.relations.insert(name.into(), relation);
        self
    }

    /// Reads a definition from its JSON form, e.g.
    /// `{"name": "Post", "datasource": "db", "relations": {"author": {"type": "belongsTo", "model": "User"}}}`.
    pub fn from_json(value: Value) -> Result<ModelDefinition> {
        check_relation_types(&value)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Rejects a relation whose `type` is not a known relation type, naming the
/// model and the relation.
fn check_relation_types(value: &Value) -> Result<()> {
    let Some(relations) = value.get("relations").and_then(Value::as_object) else {
        return Ok(());
    };
    let model = value.get("name").and_then(Value::as_str).unwrap_or_default();

    for (name, relation) in relations {
        let Some(relation) = relation.as_object() else {
            continue;
        };
        let ty = relation.get("type").unwrap_or(&Value::Null);

        if serde_json::from_value::<RelationType>(ty.clone()).is_err() {
            return Err(Error::invalid_definition(format!(
                "The relation {name:?} of the model {model:?} requires the option \"type\" to be one of \"belongsTo\", \"hasOne\", \"hasMany\" or \"referencesMany\", but {} was given.",
                Repr(ty)
            )));
        }
    }

    Ok(())
}

/// A validated model held by the [`Schema`](super::Schema).
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,

    pub base: Option<String>,

    pub datasource: Option<String>,

    /// Properties declared on this model only; see
    /// [`Schema::properties_in_hierarchy`](super::Schema::properties_in_hierarchy)
    pub properties: IndexMap<String, PropertyDefinition>,

    /// Relations declared on this model only
    pub relations: IndexMap<String, Relation>,
}
