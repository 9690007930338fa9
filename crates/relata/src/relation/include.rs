use crate::{Db, Result};

use relata_core::{
    schema::{
        BelongsTo, BelongsToTarget, DependentLink, HasMany, HasOne, ReferencesMany, Relation,
    },
    stmt::{Include, Value},
};

/// Resolves an `include` clause by dispatching each entry to the resolver
/// of its relation type.
#[derive(Debug, Clone)]
pub struct Includer {
    db: Db,
}

impl Includer {
    pub(crate) fn new(db: Db) -> Includer {
        Includer { db }
    }

    /// Includes the relations of `model_name` listed in `include`, in order.
    pub async fn include_to(
        &self,
        entities: &mut [Value],
        model_name: &str,
        include: &Include,
    ) -> Result<()> {
        include.validate()?;

        for entry in include {
            let relation_name = entry.name.as_str();
            let scope = entry.scope.as_ref();
            let relation = self
                .db
                .schema()
                .relation_definition(model_name, relation_name)?;

            match relation {
                Relation::BelongsTo(BelongsTo {
                    target: BelongsToTarget::Model(target_name),
                    foreign_key,
                }) => {
                    self.db
                        .belongs_to()
                        .include_to(
                            entities,
                            model_name,
                            target_name,
                            relation_name,
                            foreign_key.as_deref(),
                            scope,
                        )
                        .await?
                }
                Relation::BelongsTo(BelongsTo {
                    target: BelongsToTarget::Polymorphic { discriminator },
                    foreign_key,
                }) => {
                    self.db
                        .belongs_to()
                        .include_polymorphic_to(
                            entities,
                            model_name,
                            relation_name,
                            foreign_key.as_deref(),
                            discriminator.as_deref(),
                            scope,
                        )
                        .await?
                }
                Relation::HasOne(HasOne {
                    model: target_name,
                    link,
                }) => {
                    let resolver = self.db.has_one();

                    match link {
                        DependentLink::ForeignKey(foreign_key) => {
                            resolver
                                .include_to(
                                    entities,
                                    model_name,
                                    target_name,
                                    relation_name,
                                    foreign_key,
                                    scope,
                                )
                                .await?
                        }
                        DependentLink::Polymorphic {
                            foreign_key,
                            discriminator,
                        } => {
                            resolver
                                .include_polymorphic_to(
                                    entities,
                                    model_name,
                                    target_name,
                                    relation_name,
                                    foreign_key,
                                    discriminator,
                                    scope,
                                )
                                .await?
                        }
                        DependentLink::PolymorphicByRelation(target_relation_name) => {
                            resolver
                                .include_polymorphic_by_relation_name(
                                    entities,
                                    model_name,
                                    target_name,
                                    relation_name,
                                    target_relation_name,
                                    scope,
                                )
                                .await?
                        }
                    }
                }
                Relation::HasMany(HasMany {
                    model: target_name,
                    link,
                }) => {
                    let resolver = self.db.has_many();

                    match link {
                        DependentLink::ForeignKey(foreign_key) => {
                            resolver
                                .include_to(
                                    entities,
                                    model_name,
                                    target_name,
                                    relation_name,
                                    foreign_key,
                                    scope,
                                )
                                .await?
                        }
                        DependentLink::Polymorphic {
                            foreign_key,
                            discriminator,
                        } => {
                            resolver
                                .include_polymorphic_to(
                                    entities,
                                    model_name,
                                    target_name,
                                    relation_name,
                                    foreign_key,
                                    discriminator,
                                    scope,
                                )
                                .await?
                        }
                        DependentLink::PolymorphicByRelation(target_relation_name) => {
                            resolver
                                .include_polymorphic_by_relation_name(
                                    entities,
                                    model_name,
                                    target_name,
                                    relation_name,
                                    target_relation_name,
                                    scope,
                                )
                                .await?
                        }
                    }
                }
                Relation::ReferencesMany(ReferencesMany {
                    model: target_name,
                    foreign_key,
                }) => {
                    self.db
                        .references_many()
                        .include_to(
                            entities,
                            model_name,
                            target_name,
                            relation_name,
                            foreign_key.as_deref(),
                            scope,
                        )
                        .await?
                }
            }
        }

        Ok(())
    }
}
