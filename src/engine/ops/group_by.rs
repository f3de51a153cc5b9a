use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::engine::errors::IntentError;
use crate::engine::ops::aggregate::{AggregatorImpl, SummaryOperator};
use crate::engine::table::{Column, Table};
use crate::engine::types::GroupValue;

/// Groups rows by `group_columns` and aggregates every other column with
/// `operator`.
///
/// Output columns are `group_columns` (in the given order) followed by the
/// aggregated columns (in table order). Rows come out sorted by key tuple.
/// With no group columns the whole table collapses into a single row, even
/// when it has no rows.
pub fn group_by(
    table: &Table,
    group_columns: &[String],
    operator: SummaryOperator,
) -> Result<Table, IntentError> {
    let mut seen = HashSet::with_capacity(group_columns.len());
    let mut key_cols = Vec::with_capacity(group_columns.len());
    for name in group_columns {
        if !seen.insert(name.as_str()) {
            return Err(IntentError::InvalidParameter(format!(
                "Group-by column listed twice: {name}"
            )));
        }
        key_cols.push(table.require_column(name)?);
    }
    let value_cols: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|c| !seen.contains(c.name()))
        .collect();

    let new_aggs = || -> Vec<AggregatorImpl> {
        value_cols
            .iter()
            .map(|c| AggregatorImpl::from_operator(operator, c.name()))
            .collect()
    };

    let mut groups: BTreeMap<Vec<GroupValue>, Vec<AggregatorImpl>> = BTreeMap::new();
    for row in 0..table.row_count() {
        let key: Vec<GroupValue> = key_cols
            .iter()
            .map(|c| GroupValue::from(&c.values()[row]))
            .collect();
        let aggs = groups.entry(key).or_insert_with(new_aggs);
        for (agg, col) in aggs.iter_mut().zip(&value_cols) {
            agg.update(&col.values()[row])?;
        }
    }

    // If no grouping, synthesize a single default key
    if key_cols.is_empty() && groups.is_empty() {
        groups.insert(Vec::new(), new_aggs());
    }

    let mut key_values = vec![Vec::with_capacity(groups.len()); key_cols.len()];
    let mut agg_values = vec![Vec::with_capacity(groups.len()); value_cols.len()];
    for (key, aggs) in groups {
        for (slot, part) in key_values.iter_mut().zip(key) {
            slot.push(part.into_scalar());
        }
        for (slot, agg) in agg_values.iter_mut().zip(&aggs) {
            slot.push(agg.finalize());
        }
    }

    let mut columns = Vec::with_capacity(key_cols.len() + value_cols.len());
    for (col, values) in key_cols.iter().zip(key_values) {
        columns.push(Column::new(col.name(), values));
    }
    for (col, values) in value_cols.iter().zip(agg_values) {
        columns.push(Column::new(col.name(), values));
    }
    let out = Table::new(columns)?;

    debug!(
        target: "slice_compare::ops",
        group_by = ?group_columns,
        operator = operator.as_str(),
        rows_in = table.row_count(),
        groups = out.row_count(),
        "Grouped rows"
    );
    Ok(out)
}
