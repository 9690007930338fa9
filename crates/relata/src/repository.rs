use crate::{Db, Result};

use relata_core::{
    stmt::{Filter, Repr, Value, Where},
    Adapter, Error,
};

use async_recursion::async_recursion;
use std::{fmt, sync::Arc};

/// Queries and stores entities of one model through its datasource.
///
/// Obtained from [`Db::repository`]. Entities are JSON objects.
#[derive(Clone)]
pub struct Repository {
    db: Db,
    model: String,
    adapter: Arc<dyn Adapter>,
}

impl Repository {
    pub(crate) fn new(db: Db, model: &str, adapter: Arc<dyn Adapter>) -> Repository {
        Repository {
            db,
            model: model.to_string(),
            adapter,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn create(&self, entity: Value) -> Result<Value> {
        let Value::Object(row) = entity else {
            return Err(Error::invalid_argument(format!(
                "The parameter \"entity\" of Repository::create requires an Object, but {} was given.",
                Repr(&entity)
            )));
        };

        let row = self
            .adapter
            .create(self.db.schema(), &self.model, row)
            .await?;

        Ok(Value::Object(row))
    }

    /// Returns the entities matching `filter`. Relations named by
    /// `filter.include` are resolved onto the returned entities, including
    /// nested includes of their scopes.
    #[async_recursion]
    pub async fn find(&self, filter: &Filter) -> Result<Vec<Value>> {
        if let Some(include) = &filter.include {
            include.validate()?;
        }

        let rows = self
            .adapter
            .find(self.db.schema(), &self.model, filter)
            .await?;

        let mut entities: Vec<Value> = rows.into_iter().map(Value::Object).collect();

        if let Some(include) = &filter.include {
            if !entities.is_empty() {
                self.db
                    .includer()
                    .include_to(&mut entities, &self.model, include)
                    .await?;
            }
        }

        Ok(entities)
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Value>> {
        let filter = Filter {
            limit: Some(1),
            ..filter.clone()
        };

        Ok(self.find(&filter).await?.into_iter().next())
    }

    pub async fn find_by_id(&self, id: impl Into<Value>) -> Result<Option<Value>> {
        let primary_key = self.db.schema().primary_key_property_name(&self.model)?;
        self.find_one(&Filter::new().filter(Where::eq(primary_key, id)))
            .await
    }

    pub async fn count(&self, where_clause: Option<&Where>) -> Result<usize> {
        self.adapter
            .count(self.db.schema(), &self.model, where_clause)
            .await
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("model", &self.model)
            .field("adapter", &self.adapter)
            .finish()
    }
}
