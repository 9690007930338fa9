use super::{
    check_entities, check_name,
    dependent::{Cardinality, Dependents},
};
use crate::{Db, Result};

use relata_core::stmt::{Filter, Value};

#[derive(Debug, Clone)]
pub struct HasOneResolver {
    db: Db,
}

impl HasOneResolver {
    pub(crate) fn new(db: Db) -> HasOneResolver {
        HasOneResolver { db }
    }

    /// Attaches the first entity of `target_name` whose `foreign_key` equals
    /// the source primary key. Entities without a match are left untouched.
    ///
    /// One query is issued per distinct source id.
    pub async fn include_to(
        &self,
        entities: &mut [Value],
        source_name: &str,
        target_name: &str,
        relation_name: &str,
        foreign_key: &str,
        scope: Option<&Filter>,
    ) -> Result<()> {
        const METHOD: &str = "HasOneResolver::include_to";

        check_entities(METHOD, entities)?;
        check_name(METHOD, "source_name", source_name)?;
        check_name(METHOD, "target_name", target_name)?;
        check_name(METHOD, "relation_name", relation_name)?;
        check_name(METHOD, "foreign_key", foreign_key)?;

        self.dependents(source_name, target_name, relation_name)
            .include_to(entities, foreign_key, None, scope)
            .await
    }

    /// Like [`HasOneResolver::include_to`], and the target's `discriminator`
    /// must equal `source_name`.
    #[allow(clippy::too_many_arguments)]
    pub async fn include_polymorphic_to(
        &self,
        entities: &mut [Value],
        source_name: &str,
        target_name: &str,
        relation_name: &str,
        foreign_key: &str,
        discriminator: &str,
        scope: Option<&Filter>,
    ) -> Result<()> {
        const METHOD: &str = "HasOneResolver::include_polymorphic_to";

        check_entities(METHOD, entities)?;
        check_name(METHOD, "source_name", source_name)?;
        check_name(METHOD, "target_name", target_name)?;
        check_name(METHOD, "relation_name", relation_name)?;
        check_name(METHOD, "foreign_key", foreign_key)?;
        check_name(METHOD, "discriminator", discriminator)?;

        self.dependents(source_name, target_name, relation_name)
            .include_to(entities, foreign_key, Some(discriminator), scope)
            .await
    }

    /// Resolves a polymorphic relation whose keys are declared by the
    /// polymorphic belongsTo relation `target_relation_name` of the target
    /// model.
    pub async fn include_polymorphic_by_relation_name(
        &self,
        entities: &mut [Value],
        source_name: &str,
        target_name: &str,
        relation_name: &str,
        target_relation_name: &str,
        scope: Option<&Filter>,
    ) -> Result<()> {
        const METHOD: &str = "HasOneResolver::include_polymorphic_by_relation_name";

        check_entities(METHOD, entities)?;
        check_name(METHOD, "source_name", source_name)?;
        check_name(METHOD, "target_name", target_name)?;
        check_name(METHOD, "relation_name", relation_name)?;
        check_name(METHOD, "target_relation_name", target_relation_name)?;

        let dependents = self.dependents(source_name, target_name, relation_name);
        let (foreign_key, discriminator) = dependents.polymorphic_keys(target_relation_name)?;

        dependents
            .include_to(entities, &foreign_key, Some(&discriminator), scope)
            .await
    }

    fn dependents<'a>(
        &'a self,
        source_name: &'a str,
        target_name: &'a str,
        relation_name: &'a str,
    ) -> Dependents<'a> {
        Dependents {
            db: &self.db,
            cardinality: Cardinality::One,
            source_name,
            target_name,
            relation_name,
        }
    }
}
