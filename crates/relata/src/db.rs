mod builder;
pub use builder::Builder;

use crate::{
    BelongsToResolver, HasManyResolver, HasOneResolver, Includer, ReferencesManyResolver,
    Repository, Result,
};

use relata_core::{Adapter, Error, Schema};

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) schema: Schema,
    pub(crate) datasources: IndexMap<String, Arc<dyn Adapter>>,
}

/// Handle to a validated schema and its datasources.
///
/// Cloning is cheap; every clone shares the same schema and adapters. The
/// handle acts as the repository registry: [`Db::repository`] returns the
/// repository serving a model.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.shared.schema
    }

    /// Returns the repository for a model.
    ///
    /// Fails with a model-not-defined error for unknown models, and with a
    /// datasource error when the model has no datasource or names one that
    /// was not registered.
    pub fn repository(&self, model: &str) -> Result<Repository> {
        let schema = self.schema();
        schema.model(model)?;

        let Some(datasource) = schema.datasource_name(model)? else {
            return Err(Error::datasource_not_specified(model));
        };

        let adapter = self
            .shared
            .datasources
            .get(datasource)
            .ok_or_else(|| Error::datasource_not_defined(datasource))?;

        Ok(Repository::new(self.clone(), model, adapter.clone()))
    }

    pub fn belongs_to(&self) -> BelongsToResolver {
        BelongsToResolver::new(self.clone())
    }

    pub fn has_one(&self) -> HasOneResolver {
        HasOneResolver::new(self.clone())
    }

    pub fn has_many(&self) -> HasManyResolver {
        HasManyResolver::new(self.clone())
    }

    pub fn references_many(&self) -> ReferencesManyResolver {
        ReferencesManyResolver::new(self.clone())
    }

    pub fn includer(&self) -> Includer {
        Includer::new(self.clone())
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("models", &self.shared.schema.models().count())
            .field("datasources", &self.shared.datasources.keys())
            .finish()
    }
}
