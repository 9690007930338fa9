use super::{Db, Shared};
use crate::Result;

use relata_core::{
    schema::{self, ModelDefinition},
    Adapter, Error,
};

use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Schema builder
    core: schema::Builder,

    /// Adapters by datasource name
    datasources: IndexMap<String, Arc<dyn Adapter>>,
}

impl Builder {
    pub fn register(&mut self, model: ModelDefinition) -> &mut Self {
        self.core.register(model);
        self
    }

    /// Register an adapter under a datasource name. Models reference it
    /// through their `datasource` option.
    pub fn datasource(&mut self, name: impl Into<String>, adapter: impl Adapter) -> &mut Self {
        self.datasources.insert(name.into(), Arc::new(adapter));
        self
    }

    pub fn build(&self) -> Result<Db> {
        if self.datasources.contains_key("") {
            return Err(Error::invalid_definition(
                "The datasource name should be a non-empty String, but \"\" was given.",
            ));
        }

        let schema = self.core.build()?;

        for model in schema.models() {
            if let Some(datasource) = &model.datasource {
                if !self.datasources.contains_key(datasource) {
                    log::warn!(
                        "model {:?} uses datasource {datasource:?}, which is not registered",
                        model.name
                    );
                }
            }
        }

        Ok(Db {
            shared: Arc::new(Shared {
                schema,
                datasources: self.datasources.clone(),
            }),
        })
    }
}
