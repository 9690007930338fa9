use super::{Direction, Repr, Value};
use crate::{Error, Result};

use std::cmp::Ordering;

/// One `order` clause entry: `"name"`, `"name ASC"` or `"name DESC"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Order {
        Order {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Order {
        Order {
            property: property.into(),
            direction: Direction::Desc,
        }
    }

    pub fn parse(src: &str) -> Result<Order> {
        let mut parts = src.split_whitespace();

        let Some(property) = parts.next() else {
            return Err(invalid_order(&Value::String(src.to_string())));
        };

        let direction = match parts.next().map(str::to_ascii_uppercase).as_deref() {
            None | Some("ASC") => Direction::Asc,
            Some("DESC") => Direction::Desc,
            Some(_) => return Err(invalid_order(&Value::String(src.to_string()))),
        };

        if parts.next().is_some() {
            return Err(invalid_order(&Value::String(src.to_string())));
        }

        Ok(Order {
            property: property.to_string(),
            direction,
        })
    }

    /// Parses the JSON form of the `order` option: a string or an array of
    /// strings.
    pub fn from_json(value: &Value) -> Result<Vec<Order>> {
        match value {
            Value::String(src) => Ok(vec![Order::parse(src)?]),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(src) => Order::parse(src),
                    other => Err(invalid_order(other)),
                })
                .collect(),
            other => Err(invalid_order(other)),
        }
    }

    pub fn to_json(&self) -> Value {
        let direction = if self.direction.is_desc() { "DESC" } else { "ASC" };
        Value::String(format!("{} {}", self.property, direction))
    }

    /// Compares two property values the way this entry sorts them.
    ///
    /// Missing and `null` values sort first in ascending order.
    pub fn compare(&self, lhs: Option<&Value>, rhs: Option<&Value>) -> Ordering {
        let ordering = compare_values(lhs, rhs);

        if self.direction.is_desc() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

fn compare_values(lhs: Option<&Value>, rhs: Option<&Value>) -> Ordering {
    let lhs = lhs.filter(|value| !value.is_null());
    let rhs = rhs.filter(|value| !value.is_null());

    match (lhs, rhs) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(lhs), Some(rhs)) => super::cond::compare(lhs, rhs).unwrap_or(Ordering::Equal),
    }
}

fn invalid_order(value: &Value) -> Error {
    Error::invalid_argument(format!(
        "The provided option \"order\" should be a non-empty String or an Array of non-empty String, but {} was given.",
        Repr(value)
    ))
}
