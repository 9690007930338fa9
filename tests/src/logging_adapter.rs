use relata_core::{
    async_trait,
    stmt::{Filter, Row, Where},
    Adapter, Result, Schema,
};
use std::sync::{Arc, Mutex};

/// An adapter wrapper that records every operation for later assertions.
#[derive(Debug)]
pub struct LoggingAdapter {
    inner: Box<dyn Adapter>,

    /// Log of all operations executed through this adapter
    ops_log: Arc<Mutex<Vec<AdapterOp>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOp {
    Create { model: String },
    Find { model: String, filter: Filter },
    Count { model: String },
}

impl AdapterOp {
    pub fn model(&self) -> &str {
        match self {
            AdapterOp::Create { model }
            | AdapterOp::Find { model, .. }
            | AdapterOp::Count { model } => model,
        }
    }

    pub fn is_find(&self) -> bool {
        matches!(self, AdapterOp::Find { .. })
    }
}

impl LoggingAdapter {
    pub fn new(adapter: impl Adapter) -> Self {
        Self {
            inner: Box::new(adapter),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<AdapterOp>>> {
        self.ops_log.clone()
    }

    fn push(&self, op: AdapterOp) {
        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(op);
    }
}

#[async_trait]
impl Adapter for LoggingAdapter {
    async fn create(&self, schema: &Schema, model: &str, row: Row) -> Result<Row> {
        self.push(AdapterOp::Create {
            model: model.to_string(),
        });
        self.inner.create(schema, model, row).await
    }

    async fn find(&self, schema: &Schema, model: &str, filter: &Filter) -> Result<Vec<Row>> {
        self.push(AdapterOp::Find {
            model: model.to_string(),
            filter: filter.clone(),
        });
        self.inner.find(schema, model, filter).await
    }

    async fn count(
        &self,
        schema: &Schema,
        model: &str,
        where_clause: Option<&Where>,
    ) -> Result<usize> {
        self.push(AdapterOp::Count {
            model: model.to_string(),
        });
        self.inner.count(schema, model, where_clause).await
    }
}
