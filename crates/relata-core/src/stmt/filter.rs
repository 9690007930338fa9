use super::{Include, Order, Repr, Value, Where};
use crate::{Error, Result};

use serde_json::Map;

/// Query options passed to `find`, and the `scope` of an included relation.
///
/// A filter is plain data. Code that needs a modified filter clones it;
/// a caller's filter is never changed in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub where_clause: Option<Where>,
    pub fields: Option<Vec<String>>,
    pub include: Option<Include>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    pub fn filter(mut self, where_clause: Where) -> Filter {
        self.where_clause = Some(where_clause);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Filter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn include(mut self, include: Include) -> Filter {
        self.include = Some(include);
        self
    }

    pub fn order(mut self, order: Order) -> Filter {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Filter {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: usize) -> Filter {
        self.skip = Some(skip);
        self
    }

    /// Parses the JSON form `{where, fields, include, order, limit, skip}`.
    /// Unknown keys are ignored; `null` counts as absent.
    pub fn from_json(value: &Value) -> Result<Filter> {
        let Value::Object(object) = value else {
            return Err(Error::invalid_argument(format!(
                "The provided option \"filter\" should be an Object, but {} was given.",
                Repr(value)
            )));
        };

        let option = |name: &str| object.get(name).filter(|value| !value.is_null());

        Ok(Filter {
            where_clause: option("where").map(Where::from_json).transpose()?,
            fields: option("fields").map(parse_fields).transpose()?,
            include: option("include").map(Include::from_json).transpose()?,
            order: option("order")
                .map(Order::from_json)
                .transpose()?
                .unwrap_or_default(),
            limit: option("limit").map(|v| parse_count("limit", v)).transpose()?,
            skip: option("skip").map(|v| parse_count("skip", v)).transpose()?,
        })
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();

        if let Some(where_clause) = &self.where_clause {
            object.insert("where".to_string(), where_clause.to_json());
        }

        if let Some(fields) = &self.fields {
            object.insert(
                "fields".to_string(),
                Value::Array(fields.iter().cloned().map(Value::String).collect()),
            );
        }

        if let Some(include) = &self.include {
            object.insert("include".to_string(), include.to_json());
        }

        if !self.order.is_empty() {
            object.insert(
                "order".to_string(),
                Value::Array(self.order.iter().map(Order::to_json).collect()),
            );
        }

        if let Some(limit) = self.limit {
            object.insert("limit".to_string(), Value::from(limit));
        }

        if let Some(skip) = self.skip {
            object.insert("skip".to_string(), Value::from(skip));
        }

        Value::Object(object)
    }
}

fn parse_fields(value: &Value) -> Result<Vec<String>> {
    let invalid = || {
        Error::invalid_argument(format!(
            "The provided option \"fields\" should be a non-empty String or an Array of non-empty String, but {} was given.",
            Repr(value)
        ))
    };

    match value {
        Value::String(field) if !field.is_empty() => Ok(vec![field.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(field) if !field.is_empty() => Ok(field.clone()),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}

fn parse_count(option: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .and_then(|count| usize::try_from(count).ok())
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "The provided option {option:?} should be a positive Number or zero, but {} was given.",
                Repr(value)
            ))
        })
}
