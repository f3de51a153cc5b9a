use std::collections::HashSet;

use tracing::debug;

use crate::engine::errors::IntentError;
use crate::engine::table::Table;

/// Drops every column not named in `keep`.
///
/// Kept columns stay in table order and repeated names in `keep` collapse, so
/// cropping an already cropped table is a no-op.
pub fn crop_other_columns(table: &Table, keep: &[String]) -> Result<Table, IntentError> {
    let mut wanted: HashSet<&str> = HashSet::with_capacity(keep.len());
    for name in keep {
        table.require_column(name)?;
        wanted.insert(name.as_str());
    }

    let out = table.retain_columns(|name| wanted.contains(name));
    debug!(
        target: "slice_compare::ops",
        columns_in = table.column_count(),
        columns_out = out.column_count(),
        "Cropped columns"
    );
    Ok(out)
}
