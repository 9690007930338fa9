use super::present;
use crate::schema::{
    BelongsTo, BelongsToTarget, DependentLink, HasMany, HasOne, Polymorphic, ReferencesMany,
    Relation, RelationDefinition, RelationType,
};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Checks that every relation definition of a model is internally
/// consistent for its relation type.
///
/// Runs once when the schema is built. Resolvers trust relations obtained
/// from the schema.
pub struct RelationsDefinitionValidator;

impl RelationsDefinitionValidator {
    pub fn validate(
        model_name: &str,
        relations: &IndexMap<String, RelationDefinition>,
    ) -> Result<()> {
        Self::resolve(model_name, relations).map(|_| ())
    }

    /// Validates the definitions and returns their typed form.
    pub fn resolve(
        model_name: &str,
        relations: &IndexMap<String, RelationDefinition>,
    ) -> Result<IndexMap<String, Relation>> {
        relations
            .iter()
            .map(|(name, definition)| {
                let relation = Check {
                    model: model_name,
                    relation: name,
                    definition,
                }
                .run()?;
                Ok((name.clone(), relation))
            })
            .collect()
    }
}

struct Check<'a> {
    model: &'a str,
    relation: &'a str,
    definition: &'a RelationDefinition,
}

impl Check<'_> {
    fn run(&self) -> Result<Relation> {
        if self.relation.is_empty() {
            return Err(Error::invalid_definition(format!(
                "The relation name of the model {:?} should be a non-empty String, but \"\" was given.",
                self.model
            )));
        }

        match self.definition.ty {
            RelationType::BelongsTo => self.belongs_to(),
            RelationType::HasOne => Ok(Relation::HasOne(HasOne {
                model: self.required_model()?,
                link: self.dependent_link()?,
            })),
            RelationType::HasMany => Ok(Relation::HasMany(HasMany {
                model: self.required_model()?,
                link: self.dependent_link()?,
            })),
            RelationType::ReferencesMany => self.references_many(),
        }
    }

    fn belongs_to(&self) -> Result<Relation> {
        let def = self.definition;

        let target = match &def.polymorphic {
            Polymorphic::Flag(true) => BelongsToTarget::Polymorphic {
                discriminator: present(&def.discriminator).map(str::to_string),
            },
            Polymorphic::Flag(false) => {
                let model = self.required_model()?;
                self.forbid_discriminator()?;
                BelongsToTarget::Model(model)
            }
            Polymorphic::Target(value) => {
                return Err(self.fail(format!(
                    "has the type \"belongsTo\", so it expects the option \"polymorphic\" to be a Boolean, but {value:?} was given."
                )))
            }
        };

        Ok(Relation::BelongsTo(BelongsTo {
            target,
            foreign_key: present(&def.foreign_key).map(str::to_string),
        }))
    }

    fn dependent_link(&self) -> Result<DependentLink> {
        let def = self.definition;
        let ty = def.ty;

        match &def.polymorphic {
            Polymorphic::Flag(false) => {
                self.forbid_discriminator()?;
                let foreign_key = present(&def.foreign_key).ok_or_else(|| {
                    self.fail(format!(
                        "has the type {:?}, so it requires the option \"foreignKey\" to be a non-empty String.",
                        ty.to_string()
                    ))
                })?;
                Ok(DependentLink::ForeignKey(foreign_key.to_string()))
            }
            Polymorphic::Flag(true) => {
                let foreign_key = self.polymorphic_key("foreignKey", &def.foreign_key)?;
                let discriminator = self.polymorphic_key("discriminator", &def.discriminator)?;

                Ok(DependentLink::Polymorphic {
                    foreign_key,
                    discriminator,
                })
            }
            Polymorphic::Target(target_relation) if !target_relation.is_empty() => {
                let options = [
                    ("foreignKey", &def.foreign_key),
                    ("discriminator", &def.discriminator),
                ];

                for (option, value) in options {
                    if value.is_some() {
                        return Err(self.fail(format!(
                            "has the option \"polymorphic\" with a String value, so it should not have the option {option:?} to be provided."
                        )));
                    }
                }
                Ok(DependentLink::PolymorphicByRelation(target_relation.clone()))
            }
            Polymorphic::Target(_) => Err(self.fail(format!(
                "has the type {:?}, so it expects the option \"polymorphic\" to be a non-empty String or a Boolean, but \"\" was given.",
                ty.to_string()
            ))),
        }
    }

    fn references_many(&self) -> Result<Relation> {
        let def = self.definition;
        let model = self.required_model()?;

        if def.discriminator.is_some() {
            return Err(self.fail(
                "has the type \"referencesMany\", so it should not have the option \"discriminator\" to be provided.".to_string(),
            ));
        }

        if def.polymorphic.is_enabled() {
            return Err(self.fail(
                "has the type \"referencesMany\", so it should not have the option \"polymorphic\" to be provided.".to_string(),
            ));
        }

        Ok(Relation::ReferencesMany(ReferencesMany {
            model,
            foreign_key: present(&def.foreign_key).map(str::to_string),
        }))
    }

    fn required_model(&self) -> Result<String> {
        present(&self.definition.model)
            .map(str::to_string)
            .ok_or_else(|| {
                self.fail(format!(
                    "has the type {:?}, so it requires the option \"model\" to be a non-empty String.",
                    self.definition.ty.to_string()
                ))
            })
    }

    fn polymorphic_key(&self, option: &str, value: &Option<String>) -> Result<String> {
        present(value).map(str::to_string).ok_or_else(|| {
            self.fail(format!(
                "has the option \"polymorphic\" with \"true\" value, so it requires the option {option:?} to be a non-empty String."
            ))
        })
    }

    fn forbid_discriminator(&self) -> Result<()> {
        if self.definition.discriminator.is_some() {
            return Err(Error::invalid_definition(format!(
                "The relation {:?} of the model {:?} is a non-polymorphic {:?} relation, so it should not have the option \"discriminator\" to be provided.",
                self.relation,
                self.model,
                self.definition.ty.to_string()
            )));
        }
        Ok(())
    }

    fn fail(&self, reason: String) -> Error {
        Error::invalid_definition(format!(
            "The relation {:?} of the model {:?} {reason}",
            self.relation, self.model
        ))
    }
}
