use crate::{ExecLog, LoggingAdapter};
use relata::{Db, ModelDefinition, Repository, Result};
use relata_adapter_memory::MemoryAdapter;
use serde_json::Value;

/// Datasource name under which tests register the in-memory adapter
pub const DATASOURCE: &str = "memory";

/// A model definition served by the test datasource
pub fn model(name: &str) -> ModelDefinition {
    ModelDefinition::new(name).datasource(DATASOURCE)
}

/// A database over a logging in-memory adapter
#[derive(Debug)]
pub struct Test {
    pub db: Db,
    log: ExecLog,
}

impl Test {
    pub fn new(models: impl IntoIterator<Item = ModelDefinition>) -> Test {
        Test::try_new(models).unwrap()
    }

    pub fn try_new(models: impl IntoIterator<Item = ModelDefinition>) -> Result<Test> {
        Test::try_with(models, |_| {})
    }

    /// Like [`Test::try_new`], letting the caller register more datasources.
    pub fn try_with(
        models: impl IntoIterator<Item = ModelDefinition>,
        configure: impl FnOnce(&mut relata::db::Builder),
    ) -> Result<Test> {
        let _ = env_logger::builder().is_test(true).try_init();

        let adapter = LoggingAdapter::new(MemoryAdapter::new());
        let log = ExecLog::new(adapter.ops_log_handle());

        let mut builder = Db::builder();
        for model in models {
            builder.register(model);
        }
        builder.datasource(DATASOURCE, adapter);
        configure(&mut builder);

        Ok(Test {
            db: builder.build()?,
            log,
        })
    }

    pub fn repository(&self, model: &str) -> Repository {
        self.db.repository(model).unwrap()
    }

    /// Inserts entities and clears the log so assertions only see what the
    /// test itself triggers.
    pub async fn seed(
        &mut self,
        model: &str,
        entities: impl IntoIterator<Item = Value>,
    ) -> Vec<Value> {
        let repository = self.repository(model);
        let mut created = vec![];

        for entity in entities {
            created.push(repository.create(entity).await.unwrap());
        }

        self.log.clear();
        created
    }

    pub fn log(&mut self) -> &mut ExecLog {
        &mut self.log
    }
}
