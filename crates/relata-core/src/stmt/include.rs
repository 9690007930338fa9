use super::{Filter, Repr, Value};
use crate::{Error, Result};

use serde_json::Map;

/// The `include` clause: which relations to resolve on the fetched entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Include {
    relations: Vec<IncludeRelation>,
}

/// A single relation to include, with an optional scope that filters the
/// related entities and may carry a nested `include`.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeRelation {
    pub name: String,
    pub scope: Option<Filter>,
}

impl Include {
    pub fn new() -> Include {
        Include::default()
    }

    pub fn relation(mut self, name: impl Into<String>) -> Include {
        self.relations.push(IncludeRelation {
            name: name.into(),
            scope: None,
        });
        self
    }

    pub fn relation_with_scope(mut self, name: impl Into<String>, scope: Filter) -> Include {
        self.relations.push(IncludeRelation {
            name: name.into(),
            scope: Some(scope),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncludeRelation> {
        self.relations.iter()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Checks relation names are non-empty and unique, recursing into
    /// nested scopes.
    pub fn validate(&self) -> Result<()> {
        for (index, relation) in self.relations.iter().enumerate() {
            if relation.name.is_empty() {
                return Err(Error::invalid_argument(
                    "The provided option \"include\" should have a non-empty String, an Object or an Array, but \"\" was given.",
                ));
            }

            if self.relations[..index]
                .iter()
                .any(|prev| prev.name == relation.name)
            {
                return Err(Error::invalid_argument(format!(
                    "The provided option \"include\" has duplicates of {:?}.",
                    relation.name
                )));
            }

            let nested = relation
                .scope
                .as_ref()
                .and_then(|scope| scope.include.as_ref());

            if let Some(include) = nested {
                include.validate()?;
            }
        }

        Ok(())
    }

    /// Parses the JSON form of an `include` clause.
    ///
    /// Accepted shapes:
    /// - `"rel"`
    /// - `["rel", {...}]`
    /// - `{"rel": <nested include>}`
    /// - `{"relation": "rel", "scope": {...}}`
    pub fn from_json(value: &Value) -> Result<Include> {
        let mut include = Include::new();
        include.extend_from_json(value)?;
        include.validate()?;
        Ok(include)
    }

    fn extend_from_json(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::String(name) if !name.is_empty() => {
                self.relations.push(IncludeRelation {
                    name: name.clone(),
                    scope: None,
                });
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(_) | Value::Object(_) => self.extend_from_json(item)?,
                        other => return Err(invalid_include(other)),
                    }
                }
            }
            Value::Object(object) if object.contains_key("relation") => {
                self.relations.push(parse_relation_object(object)?);
            }
            Value::Object(object) => {
                for (name, nested) in object {
                    let scope = Filter {
                        include: Some(Include::from_json(nested)?),
                        ..Filter::default()
                    };

                    self.relations.push(IncludeRelation {
                        name: name.clone(),
                        scope: Some(scope),
                    });
                }
            }
            other => return Err(invalid_include(other)),
        }

        Ok(())
    }

    pub fn to_json(&self) -> Value {
        Value::Array(
            self.relations
                .iter()
                .map(|relation| match &relation.scope {
                    None => Value::String(relation.name.clone()),
                    Some(scope) => {
                        let mut object = Map::new();
                        object.insert("relation".to_string(), Value::String(relation.name.clone()));
                        object.insert("scope".to_string(), scope.to_json());
                        Value::Object(object)
                    }
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Include {
    type IntoIter = std::slice::Iter<'a, IncludeRelation>;
    type Item = &'a IncludeRelation;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

fn parse_relation_object(object: &Map<String, Value>) -> Result<IncludeRelation> {
    let name = match object.get("relation") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        other => {
            return Err(Error::invalid_argument(format!(
                "The provided option \"relation\" should be a non-empty String, but {} was given.",
                Repr(other.unwrap_or(&Value::Null))
            )))
        }
    };

    let scope = match object.get("scope") {
        None | Some(Value::Null) => None,
        Some(scope @ Value::Object(_)) => Some(Filter::from_json(scope)?),
        Some(other) => {
            return Err(Error::invalid_argument(format!(
                "The provided option \"scope\" should be an Object, but {} was given.",
                Repr(other)
            )))
        }
    };

    Ok(IncludeRelation { name, scope })
}

fn invalid_include(value: &Value) -> Error {
    Error::invalid_argument(format!(
        "The provided option \"include\" should have a non-empty String, an Object or an Array, but {} was given.",
        Repr(value)
    ))
}
