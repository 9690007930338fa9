use relata_core::{
    async_trait, bail,
    stmt::{Filter, Row, Where},
    Adapter, Result, Schema,
};

/// An adapter whose every operation fails. Used to check that storage
/// errors reach the caller.
#[derive(Debug, Default)]
pub struct FailingAdapter;

#[async_trait]
impl Adapter for FailingAdapter {
    async fn create(&self, _schema: &Schema, model: &str, _row: Row) -> Result<Row> {
        bail!("storage unavailable; model={model}")
    }

    async fn find(&self, _schema: &Schema, model: &str, _filter: &Filter) -> Result<Vec<Row>> {
        bail!("storage unavailable; model={model}")
    }

    async fn count(&self, _schema: &Schema, model: &str, _where: Option<&Where>) -> Result<usize> {
        bail!("storage unavailable; model={model}")
    }
}
