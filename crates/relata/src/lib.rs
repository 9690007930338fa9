pub mod db;
pub use db::Db;

pub mod relation;
pub use relation::{
    BelongsToResolver, HasManyResolver, HasOneResolver, Includer, ReferencesManyResolver,
};

mod repository;
pub use repository::Repository;

pub use relata_core::{
    async_trait,
    schema::{self, ModelDefinition, PropertyDefinition, RelationDefinition},
    stmt::{self, Filter, Include, Where},
    Adapter, Error, Result, Schema,
};
