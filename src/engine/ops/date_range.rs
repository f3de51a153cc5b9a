use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::errors::IntentError;
use crate::engine::table::Table;
use crate::shared::time::DateParser;

/// Inclusive `(start, end)` bounds, kept as text until a format is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange(pub String, pub String);

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self(start.into(), end.into())
    }

    pub fn start(&self) -> &str {
        &self.0
    }

    pub fn end(&self) -> &str {
        &self.1
    }
}

/// Keeps rows whose `column` value lies within `range`, both ends inclusive.
///
/// A `None` range returns the table unchanged. Null dates never fall inside a
/// range; non-null values that do not parse under `format` fail the call.
pub fn apply_date_range(
    table: &Table,
    range: Option<&DateRange>,
    column: &str,
    format: &str,
) -> Result<Table, IntentError> {
    let Some(range) = range else {
        return Ok(table.clone());
    };
    let col = table.require_column(column)?;
    let start = DateParser::parse_str(range.start(), format)?;
    let end = DateParser::parse_str(range.end(), format)?;

    let mut mask = Vec::with_capacity(col.len());
    for value in col.values() {
        let keep = match DateParser::parse_cell(value, format)? {
            Some(dt) => start <= dt && dt <= end,
            None => false,
        };
        mask.push(keep);
    }

    let out = table.filter_rows(&mask);
    debug!(
        target: "slice_compare::ops",
        column,
        start = range.start(),
        end = range.end(),
        rows_in = table.row_count(),
        rows_out = out.row_count(),
        "Applied date range"
    );
    Ok(out)
}
