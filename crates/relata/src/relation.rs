//! Relation resolvers.
//!
//! Each resolver takes entities that were already fetched for a source
//! model, queries the target repository in batches, and writes the related
//! entities onto every source entity under the relation name.

mod belongs_to;
pub use belongs_to::BelongsToResolver;

mod dependent;

mod has_many;
pub use has_many::HasManyResolver;

mod has_one;
pub use has_one::HasOneResolver;

mod include;
pub use include::Includer;

mod references_many;
pub use references_many::ReferencesManyResolver;

pub mod scope;

use crate::Result;

use relata_core::{
    stmt::{Repr, Value},
    Error,
};

use indexmap::IndexMap;

/// Hashable identity of a key value. Values of different JSON types never
/// share a key, so `10` and `"10"` are distinct ids. Numbers are keyed by
/// their numeric value, so `10` and `10.0` are the same id.
pub(crate) fn key_of(value: &Value) -> String {
    match value {
        Value::Number(number) if number.is_f64() => match number.as_f64() {
            Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                (float as i64).to_string()
            }
            _ => number.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Reads a property of an entity, treating `null` as absent.
pub(crate) fn field<'a>(entity: &'a Value, property: &str) -> Option<&'a Value> {
    entity.get(property).filter(|value| !value.is_null())
}

pub(crate) fn set_relation(entity: &mut Value, relation_name: &str, value: Value) {
    if let Value::Object(object) = entity {
        object.insert(relation_name.to_string(), value);
    }
}

/// Indexes entities by the given property. The first entity wins when
/// several share a key.
pub(crate) fn index_by(entities: Vec<Value>, property: &str) -> IndexMap<String, Value> {
    let mut index = IndexMap::new();

    for entity in entities {
        if let Some(key) = field(&entity, property).map(key_of) {
            index.entry(key).or_insert(entity);
        }
    }

    index
}

/// Distinct non-null values of `property`, in first-seen order.
pub(crate) fn distinct_values<'a>(
    values: impl IntoIterator<Item = &'a Value>,
) -> IndexMap<String, Value> {
    let mut distinct = IndexMap::new();

    for value in values.into_iter().filter(|value| !value.is_null()) {
        distinct
            .entry(key_of(value))
            .or_insert_with(|| value.clone());
    }

    distinct
}

pub(crate) fn check_entities(method: &str, entities: &[Value]) -> Result<()> {
    match entities.iter().find(|entity| !entity.is_object()) {
        None => Ok(()),
        Some(entity) => Err(Error::invalid_argument(format!(
            "The parameter \"entities\" of {method} requires an Array of Object, but {} was given.",
            Repr(entity)
        ))),
    }
}

pub(crate) fn check_name(method: &str, parameter: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!(
            "The parameter {parameter:?} of {method} requires a non-empty String, but \"\" was given."
        )));
    }
    Ok(())
}

/// An optional key parameter; an empty string falls back to the default.
pub(crate) fn key_or(value: Option<&str>, default: impl FnOnce() -> String) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default(),
    }
}
