//! Merging a caller's scope with a relation's own condition.

use relata_core::stmt::{Filter, Where};

/// Builds the filter a resolver sends to the target repository.
///
/// The result is a copy of `scope` whose `where` is
/// `and: [condition, <scope where>]`. The caller's `where` is kept as a
/// single nested operand, so its own `and`/`or` grouping is preserved. Every
/// other option of the scope passes through unchanged.
pub fn compose(scope: Option<&Filter>, condition: Where) -> Filter {
    let mut filter = scope.cloned().unwrap_or_default();

    let mut operands = vec![condition];
    operands.extend(filter.where_clause.take());
    filter.where_clause = Some(Where::and(operands));

    filter
}
