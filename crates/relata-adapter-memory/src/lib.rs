mod table;
use table::Table;

use indexmap::IndexMap;
use relata_core::{
    async_trait,
    stmt::{Filter, Row, Where},
    Adapter, Result, Schema,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Adapter keeping every model's rows in process memory.
///
/// Rows are returned in insertion order unless the filter orders them.
/// Numeric primary keys are generated for rows created without one.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    tables: Mutex<IndexMap<String, Table>>,
}

impl MemoryAdapter {
    pub fn new() -> MemoryAdapter {
        MemoryAdapter::default()
    }

    /// Number of rows stored for a model.
    pub fn len(&self, model: &str) -> usize {
        self.tables().get(model).map(Table::len).unwrap_or(0)
    }

    pub fn is_empty(&self, model: &str) -> bool {
        self.len(model) == 0
    }

    fn tables(&self) -> MutexGuard<'_, IndexMap<String, Table>> {
        // A panic while holding the lock leaves every table consistent; each
        // operation mutates at most one row.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Adapter for MemoryAdapter {
    async fn create(&self, schema: &Schema, model: &str, row: Row) -> Result<Row> {
        let primary_key = schema.primary_key_property_name(model)?;
        log::trace!("create; model={model}");

        self.tables()
            .entry(model.to_string())
            .or_default()
            .insert(model, &primary_key, row)
    }

    async fn find(&self, schema: &Schema, model: &str, filter: &Filter) -> Result<Vec<Row>> {
        let primary_key = schema.primary_key_property_name(model)?;
        log::trace!("find; model={model} filter={}", filter.to_json());

        Ok(self
            .tables()
            .get(model)
            .map(|table| table.select(&primary_key, filter))
            .unwrap_or_default())
    }

    async fn count(
        &self,
        schema: &Schema,
        model: &str,
        where_clause: Option<&Where>,
    ) -> Result<usize> {
        schema.model(model)?;
        log::trace!("count; model={model}");

        Ok(self
            .tables()
            .get(model)
            .map(|table| table.count(where_clause))
            .unwrap_or(0))
    }
}
