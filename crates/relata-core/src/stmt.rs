mod cond;
pub use cond::Cond;

mod direction;
pub use direction::Direction;

mod filter;
pub use filter::Filter;

mod include;
pub use include::{Include, IncludeRelation};

mod order;
pub use order::Order;

mod repr;
pub use repr::Repr;

mod where_clause;
pub use where_clause::Where;

pub use serde_json::Value;

/// A stored record as seen by adapters: property name to value.
pub type Row = serde_json::Map<String, Value>;
