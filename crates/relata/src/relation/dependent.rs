//! Shared resolution for hasOne and hasMany, whose foreign key lives on the
//! target entity.

use super::{distinct_values, field, key_of, scope, set_relation};
use crate::{Db, Result};

use relata_core::{
    schema::Relation,
    stmt::{Cond, Filter, Value, Where},
    Error,
};

use futures::future::try_join_all;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    fn name(self) -> &'static str {
        match self {
            Cardinality::One => "hasOne",
            Cardinality::Many => "hasMany",
        }
    }
}

pub(super) struct Dependents<'a> {
    pub(super) db: &'a Db,
    pub(super) cardinality: Cardinality,
    pub(super) source_name: &'a str,
    pub(super) target_name: &'a str,
    pub(super) relation_name: &'a str,
}

impl Dependents<'_> {
    /// Queries the dependents of every distinct source id, one query per id,
    /// all in flight together.
    ///
    /// With a discriminator, dependents must also name the source model in
    /// that property.
    pub(super) async fn include_to(
        &self,
        entities: &mut [Value],
        foreign_key: &str,
        discriminator: Option<&str>,
        scope: Option<&Filter>,
    ) -> Result<()> {
        let repository = self.db.repository(self.target_name)?;
        let source_pk = self.db.schema().primary_key_property_name(self.source_name)?;

        let ids = distinct_values(entities.iter().filter_map(|entity| field(entity, &source_pk)));

        log::debug!(
            "{}.{}: {} {}, {} queries for {} entities",
            self.source_name,
            self.relation_name,
            self.cardinality.name(),
            self.target_name,
            ids.len(),
            entities.len()
        );

        let queries = ids.into_iter().map(|(key, id)| {
            let mut condition = Where::eq(foreign_key, id);

            if let Some(discriminator) = discriminator {
                condition = condition.with(discriminator, Cond::Eq(Value::from(self.source_name)));
            }

            let mut filter = scope::compose(scope, condition);

            if self.cardinality == Cardinality::One {
                filter.limit = Some(1);
            }

            let repository = &repository;
            async move {
                let targets = repository.find(&filter).await?;
                Ok::<_, Error>((key, targets))
            }
        });

        let found: IndexMap<String, Vec<Value>> =
            try_join_all(queries).await?.into_iter().collect();

        for entity in entities.iter_mut() {
            let targets = field(entity, &source_pk).and_then(|id| found.get(&key_of(id)));

            match self.cardinality {
                Cardinality::Many => {
                    let targets = targets.cloned().unwrap_or_default();
                    set_relation(entity, self.relation_name, Value::Array(targets));
                }
                Cardinality::One => {
                    if let Some(target) = targets.and_then(|targets| targets.first()).cloned() {
                        set_relation(entity, self.relation_name, target);
                    }
                }
            }
        }

        Ok(())
    }

    /// Reads the foreign key and discriminator from the polymorphic
    /// belongsTo relation `target_relation_name` of the target model.
    pub(super) fn polymorphic_keys(&self, target_relation_name: &str) -> Result<(String, String)> {
        let relation = self
            .db
            .schema()
            .relation_definition(self.target_name, target_relation_name)?;

        let Relation::BelongsTo(belongs_to) = relation else {
            return Err(Error::invalid_argument(format!(
                "The relation {:?} of the model {:?} is a polymorphic {:?} relation, so it requires the target relation {:?} to be a polymorphic \"belongsTo\", but {:?} type was given.",
                self.relation_name,
                self.source_name,
                self.cardinality.name(),
                target_relation_name,
                relation.ty().to_string()
            )));
        };

        if !belongs_to.is_polymorphic() {
            return Err(Error::invalid_argument(format!(
                "The relation {:?} of the model {:?} is a polymorphic {:?} relation, so it requires the target relation {:?} to be a polymorphic too.",
                self.relation_name,
                self.source_name,
                self.cardinality.name(),
                target_relation_name
            )));
        }

        let foreign_key = belongs_to
            .foreign_key
            .clone()
            .unwrap_or_else(|| format!("{target_relation_name}Id"));

        let discriminator = belongs_to
            .discriminator()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{target_relation_name}Type"));

        Ok((foreign_key, discriminator))
    }
}
