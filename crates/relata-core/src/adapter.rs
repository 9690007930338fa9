use crate::{
    async_trait,
    stmt::{Filter, Row, Where},
    Schema,
};

use std::fmt::Debug;

/// Storage backend behind a datasource.
///
/// Adapters receive the schema so they can resolve primary key names and
/// other model metadata. Relation resolution never reaches the adapter:
/// `include` clauses are handled by the repository layer.
#[async_trait]
pub trait Adapter: Debug + Send + Sync + 'static {
    /// Insert a row, returning it as stored (with a generated primary key
    /// when none was given).
    async fn create(&self, schema: &Schema, model: &str, row: Row) -> crate::Result<Row>;

    /// Return the rows matching `filter.where_clause`, ordered, paginated
    /// and projected according to the rest of the filter.
    async fn find(&self, schema: &Schema, model: &str, filter: &Filter) -> crate::Result<Vec<Row>>;

    /// Count the rows matching the condition.
    async fn count(
        &self,
        schema: &Schema,
        model: &str,
        where_clause: Option<&Where>,
    ) -> crate::Result<usize>;
}
