use super::{
    check_entities, check_name, distinct_values, field, index_by, key_of, key_or, scope,
    set_relation,
};
use crate::{Db, Result};

use relata_core::stmt::{Filter, Value, Where};
use std_util::str::singular;

use indexmap::IndexMap;

/// Resolves relations where the source entity holds an array of target ids.
#[derive(Debug, Clone)]
pub struct ReferencesManyResolver {
    db: Db,
}

impl ReferencesManyResolver {
    pub(crate) fn new(db: Db) -> ReferencesManyResolver {
        ReferencesManyResolver { db }
    }

    /// Attaches the targets listed in each entity's `foreign_key` array
    /// (default `<singular relation_name>Ids`), in the order of that array.
    ///
    /// All ids go into a single query, so a `limit` or `skip` in `scope`
    /// bounds the shared candidate set rather than each entity's array.
    /// Entities without an id array receive an empty array.
    pub async fn include_to(
        &self,
        entities: &mut [Value],
        source_name: &str,
        target_name: &str,
        relation_name: &str,
        foreign_key: Option<&str>,
        scope: Option<&Filter>,
    ) -> Result<()> {
        const METHOD: &str = "ReferencesManyResolver::include_to";

        check_entities(METHOD, entities)?;
        check_name(METHOD, "source_name", source_name)?;
        check_name(METHOD, "target_name", target_name)?;
        check_name(METHOD, "relation_name", relation_name)?;

        let foreign_key = key_or(foreign_key, || format!("{}Ids", singular(relation_name)));

        let repository = self.db.repository(target_name)?;
        let target_pk = self.db.schema().primary_key_property_name(target_name)?;

        let ids = distinct_values(
            entities
                .iter()
                .filter_map(|entity| field(entity, &foreign_key))
                .filter_map(Value::as_array)
                .flatten(),
        );

        let targets = if ids.is_empty() {
            IndexMap::new()
        } else {
            let filter = scope::compose(scope, Where::inq(&target_pk, ids.into_values().collect()));

            log::debug!(
                "{source_name}.{relation_name}: referencesMany {target_name}, {} entities",
                entities.len()
            );

            index_by(repository.find(&filter).await?, &target_pk)
        };

        for entity in entities.iter_mut() {
            let related: Vec<Value> = match field(entity, &foreign_key) {
                Some(Value::Array(ids)) => ids
                    .iter()
                    .filter_map(|id| targets.get(&key_of(id)))
                    .cloned()
                    .collect(),
                _ => vec![],
            };

            set_relation(entity, relation_name, Value::Array(related));
        }

        Ok(())
    }
}
