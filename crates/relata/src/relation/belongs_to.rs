use super::{
    check_entities, check_name, distinct_values, field, index_by, key_of, key_or, scope,
    set_relation,
};
use crate::{Db, Result};

use relata_core::stmt::{Filter, Value, Where};
use std_util::str::singular;

use futures::future::try_join_all;
use indexmap::IndexMap;

/// Resolves relations where the source entity holds the id of its target.
#[derive(Debug, Clone)]
pub struct BelongsToResolver {
    db: Db,
}

impl BelongsToResolver {
    pub(crate) fn new(db: Db) -> BelongsToResolver {
        BelongsToResolver { db }
    }

    /// Attaches the target entity referenced by `foreign_key` (default
    /// `<relation_name>Id`) to each entity.
    ///
    /// Issues a single query for all entities. Entities without a match are
    /// left untouched.
    pub async fn include_to(
        &self,
        entities: &mut [Value],
        source_name: &str,
        target_name: &str,
        relation_name: &str,
        foreign_key: Option<&str>,
        scope: Option<&Filter>,
    ) -> Result<()> {
        const METHOD: &str = "BelongsToResolver::include_to";

        check_entities(METHOD, entities)?;
        check_name(METHOD, "source_name", source_name)?;
        check_name(METHOD, "target_name", target_name)?;
        check_name(METHOD, "relation_name", relation_name)?;

        let foreign_key = key_or(foreign_key, || format!("{relation_name}Id"));

        let repository = self.db.repository(target_name)?;
        let target_pk = self.db.schema().primary_key_property_name(target_name)?;

        let ids = distinct_values(entities.iter().filter_map(|entity| field(entity, &foreign_key)));
        if ids.is_empty() {
            return Ok(());
        }

        let filter = scope::compose(scope, Where::inq(&target_pk, ids.into_values().collect()));

        log::debug!(
            "{source_name}.{relation_name}: belongsTo {target_name}, {} entities",
            entities.len()
        );

        let targets = index_by(repository.find(&filter).await?, &target_pk);

        for entity in entities.iter_mut() {
            let target = field(entity, &foreign_key).and_then(|id| targets.get(&key_of(id)));

            if let Some(target) = target.cloned() {
                set_relation(entity, relation_name, target);
            }
        }

        Ok(())
    }

    /// Attaches targets whose model varies per entity.
    ///
    /// Each entity names its target model in `discriminator` (default
    /// `<singular relation_name>Type`) and holds the target id in
    /// `foreign_key` (default `<singular relation_name>Id`). One query is
    /// issued per distinct target model. A target model that is not defined
    /// or has no datasource yields no matches instead of an error.
    pub async fn include_polymorphic_to(
        &self,
        entities: &mut [Value],
        source_name: &str,
        relation_name: &str,
        foreign_key: Option<&str>,
        discriminator: Option<&str>,
        scope: Option<&Filter>,
    ) -> Result<()> {
        const METHOD: &str = "BelongsToResolver::include_polymorphic_to";

        check_entities(METHOD, entities)?;
        check_name(METHOD, "source_name", source_name)?;
        check_name(METHOD, "relation_name", relation_name)?;

        let singular_name = singular(relation_name);
        let foreign_key = key_or(foreign_key, || format!("{singular_name}Id"));
        let discriminator = key_or(discriminator, || format!("{singular_name}Type"));

        let mut groups: IndexMap<String, Vec<&Value>> = IndexMap::new();

        for entity in entities.iter() {
            let Some(Value::String(target_name)) = field(entity, &discriminator) else {
                continue;
            };

            if target_name.is_empty() {
                continue;
            }

            if let Some(id) = field(entity, &foreign_key) {
                groups.entry(target_name.clone()).or_default().push(id);
            }
        }

        if groups.is_empty() {
            return Ok(());
        }

        let queries = groups.into_iter().map(|(target_name, ids)| {
            self.find_group(
                source_name,
                relation_name,
                target_name,
                distinct_values(ids),
                scope,
            )
        });

        let found: IndexMap<String, IndexMap<String, Value>> =
            try_join_all(queries).await?.into_iter().flatten().collect();

        for entity in entities.iter_mut() {
            let target = match (field(entity, &discriminator), field(entity, &foreign_key)) {
                (Some(Value::String(target_name)), Some(id)) => found
                    .get(target_name)
                    .and_then(|targets| targets.get(&key_of(id))),
                _ => None,
            };

            if let Some(target) = target.cloned() {
                set_relation(entity, relation_name, target);
            }
        }

        Ok(())
    }

    /// Fetches one target model's share of a polymorphic relation. Returns
    /// `None` when the model is not served by any datasource.
    async fn find_group(
        &self,
        source_name: &str,
        relation_name: &str,
        target_name: String,
        ids: IndexMap<String, Value>,
        scope: Option<&Filter>,
    ) -> Result<Option<(String, IndexMap<String, Value>)>> {
        let repository = match self.db.repository(&target_name) {
            Ok(repository) => repository,
            Err(err) if err.is_model_not_defined() || err.is_datasource_not_specified() => {
                log::debug!("{source_name}.{relation_name}: skipping {target_name}; {err}");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let target_pk = self.db.schema().primary_key_property_name(&target_name)?;
        let filter = scope::compose(scope, Where::inq(&target_pk, ids.into_values().collect()));

        log::debug!("{source_name}.{relation_name}: belongsTo {target_name} (polymorphic)");

        let targets = repository.find(&filter).await?;
        Ok(Some((target_name, index_by(targets, &target_pk))))
    }
}
