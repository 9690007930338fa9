use super::{Cond, Repr, Row, Value};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::Map;

/// A `where` predicate tree.
///
/// Composition never flattens: [`Where::and`] keeps every operand as given,
/// so an operand that is itself an `and` group stays a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    And(Vec<Where>),
    Or(Vec<Where>),
    /// Property conditions that must all hold.
    Props(IndexMap<String, Cond>),
}

impl Where {
    pub fn and(operands: impl IntoIterator<Item = Where>) -> Where {
        Where::And(operands.into_iter().collect())
    }

    pub fn or(operands: impl IntoIterator<Item = Where>) -> Where {
        Where::Or(operands.into_iter().collect())
    }

    pub fn prop(property: impl Into<String>, cond: Cond) -> Where {
        let mut props = IndexMap::new();
        props.insert(property.into(), cond);
        Where::Props(props)
    }

    pub fn eq(property: impl Into<String>, value: impl Into<Value>) -> Where {
        Where::prop(property, Cond::Eq(value.into()))
    }

    pub fn inq(property: impl Into<String>, values: Vec<Value>) -> Where {
        Where::prop(property, Cond::Inq(values))
    }

    /// Adds a property condition. On a `Props` node the condition joins the
    /// existing ones; any other node is wrapped in an `and` group.
    pub fn with(self, property: impl Into<String>, cond: Cond) -> Where {
        let property = property.into();

        match self {
            Where::Props(mut props) if !props.contains_key(&property) => {
                props.insert(property, cond);
                Where::Props(props)
            }
            other => Where::And(vec![other, Where::prop(property, cond)]),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Where::And(operands) => operands.iter().all(|operand| operand.matches(row)),
            Where::Or(operands) => operands.iter().any(|operand| operand.matches(row)),
            Where::Props(props) => props
                .iter()
                .all(|(property, cond)| cond.matches(row.get(property))),
        }
    }

    /// Parses the JSON form of a `where` clause.
    ///
    /// The `and` and `or` keys become groups; every other key is a property
    /// condition. An object that mixes both is the conjunction of its
    /// property conditions and its groups.
    pub fn from_json(value: &Value) -> Result<Where> {
        let Value::Object(object) = value else {
            return Err(Error::invalid_argument(format!(
                "The provided option \"where\" should be an Object, but {} was given.",
                Repr(value)
            )));
        };

        let mut props = IndexMap::new();
        let mut operands = vec![];

        for (key, value) in object {
            match key.as_str() {
                "and" | "or" => {
                    let Value::Array(items) = value else {
                        return Err(Error::invalid_argument(format!(
                            "The provided option {key:?} of the \"where\" clause should be an Array, but {} was given.",
                            Repr(value)
                        )));
                    };

                    let items = items
                        .iter()
                        .map(Where::from_json)
                        .collect::<Result<Vec<_>>>()?;

                    operands.push(if key == "and" {
                        Where::And(items)
                    } else {
                        Where::Or(items)
                    });
                }
                property => {
                    for cond in Cond::from_json(property, value)? {
                        if props.contains_key(property) {
                            operands.push(Where::prop(property, cond));
                        } else {
                            props.insert(property.to_string(), cond);
                        }
                    }
                }
            }
        }

        if operands.is_empty() {
            return Ok(Where::Props(props));
        }

        if !props.is_empty() {
            operands.insert(0, Where::Props(props));
        }

        if operands.len() == 1 {
            Ok(operands.remove(0))
        } else {
            Ok(Where::And(operands))
        }
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();

        match self {
            Where::And(operands) => {
                object.insert(
                    "and".to_string(),
                    Value::Array(operands.iter().map(Where::to_json).collect()),
                );
            }
            Where::Or(operands) => {
                object.insert(
                    "or".to_string(),
                    Value::Array(operands.iter().map(Where::to_json).collect()),
                );
            }
            Where::Props(props) => {
                for (property, cond) in props {
                    object.insert(property.clone(), cond.to_json());
                }
            }
        }

        Value::Object(object)
    }
}
