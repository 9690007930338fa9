use relata_core::{
    stmt::{Filter, Repr, Row, Value, Where},
    Error, Result,
};

use std::cmp::Ordering;

#[derive(Debug, Default)]
pub(crate) struct Table {
    rows: Vec<Row>,

    /// Last generated primary key
    last_id: u64,
}

impl Table {
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn insert(&mut self, model: &str, primary_key: &str, mut row: Row) -> Result<Row> {
        match row.get(primary_key).filter(|id| !id.is_null()) {
            None => {
                self.last_id += 1;
                row.insert(primary_key.to_string(), Value::from(self.last_id));
            }
            Some(id) => {
                if self.rows.iter().any(|existing| existing.get(primary_key) == Some(id)) {
                    return Err(Error::invalid_argument(format!(
                        "The value {} of the primary key {primary_key:?} already exists in the model {model:?}.",
                        Repr(id)
                    )));
                }

                if let Some(id) = id.as_u64() {
                    self.last_id = self.last_id.max(id);
                }
            }
        }

        self.rows.push(row.clone());
        Ok(row)
    }

    pub(crate) fn count(&self, where_clause: Option<&Where>) -> usize {
        self.rows
            .iter()
            .filter(|row| where_clause.map_or(true, |expr| expr.matches(row)))
            .count()
    }

    /// Applies `where`, `order`, `skip`, `limit` and `fields`, in that order.
    /// Projection always keeps the primary key.
    pub(crate) fn select(&self, primary_key: &str, filter: &Filter) -> Vec<Row> {
        let mut rows: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| {
                filter
                    .where_clause
                    .as_ref()
                    .map_or(true, |expr| expr.matches(row))
            })
            .collect();

        if !filter.order.is_empty() {
            rows.sort_by(|lhs, rhs| {
                filter
                    .order
                    .iter()
                    .map(|order| order.compare(lhs.get(&order.property), rhs.get(&order.property)))
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        let rows = rows
            .into_iter()
            .skip(filter.skip.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX));

        match &filter.fields {
            None => rows.cloned().collect(),
            Some(fields) => rows
                .map(|row| {
                    row.iter()
                        .filter(|(name, _)| {
                            name.as_str() == primary_key
                                || fields.iter().any(|field| field == *name)
                        })
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect()
                })
                .collect(),
        }
    }
}
