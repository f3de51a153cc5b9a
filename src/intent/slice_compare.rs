//! The slice-compare intent.
//!
//! Filters a table by date range and slices, crops it to the dimensions and
//! the metric, then groups by the dimensions with the compared dimension moved
//! to the innermost position. Rows sharing the outer dimensions end up next to
//! each other, one per compared value, so they can be read side by side.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::errors::IntentError;
use crate::engine::ops::{
    DateRange, SliceSpec, SummaryOperator, apply_date_range, crop_other_columns, group_by,
    slice_table, validate_slices,
};
use crate::engine::table::Table;
use crate::shared::config::{CONFIG, QueryConfig};
use crate::shared::time::DEFAULT_DATE_FORMAT;

/// The dimension being compared, plus the values of it under comparison.
///
/// Serialized as a list whose first element is the column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SliceCompareColumn {
    column: String,
    values: Vec<String>,
}

impl SliceCompareColumn {
    pub fn new<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Values being compared. Carried for callers; grouping does not use them.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl TryFrom<Vec<String>> for SliceCompareColumn {
    type Error = IntentError;

    fn try_from(mut parts: Vec<String>) -> Result<Self, Self::Error> {
        if parts.is_empty() {
            return Err(IntentError::InvalidParameter(
                "slice_compare_column must name a column".to_string(),
            ));
        }
        let column = parts.remove(0);
        Ok(Self {
            column,
            values: parts,
        })
    }
}

impl From<SliceCompareColumn> for Vec<String> {
    fn from(value: SliceCompareColumn) -> Self {
        let mut parts = Vec::with_capacity(value.values.len() + 1);
        parts.push(value.column);
        parts.extend(value.values);
        parts
    }
}

/// Optional knobs of the intent.
///
/// Defaults: `date_column_name = "date"`, no date range, `date_format =
/// "%Y-%m-%d"`. Fields omitted when deserializing take the `[query]` section
/// of the loaded settings instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default = "SliceCompareOptions::from_app_config")]
pub struct SliceCompareOptions {
    pub date_column_name: String,
    /// Inclusive range; `None` disables date filtering.
    pub date_range: Option<DateRange>,
    /// chrono strftime pattern for the date column and the range endpoints
    pub date_format: String,
}

impl Default for SliceCompareOptions {
    fn default() -> Self {
        Self {
            date_column_name: "date".to_string(),
            date_range: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl SliceCompareOptions {
    pub fn from_query_config(cfg: &QueryConfig) -> Self {
        Self {
            date_column_name: cfg.date_column_name.clone(),
            date_range: None,
            date_format: cfg.date_format.clone(),
        }
    }

    /// Create from application configuration
    pub fn from_app_config() -> Self {
        Self::from_query_config(&CONFIG.query)
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column_name = name.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

/// A complete slice-compare request, as read from a query file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SliceCompareQuery {
    pub metric: String,
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub slices: Option<SliceSpec>,
    pub slice_compare_column: SliceCompareColumn,
    pub summary_operator: SummaryOperator,
    #[serde(flatten)]
    pub options: SliceCompareOptions,
}

impl SliceCompareQuery {
    pub fn execute(&self, table: &Table) -> Result<Table, IntentError> {
        slice_compare(
            table,
            &self.metric,
            &self.dimensions,
            self.slices.as_ref(),
            &self.slice_compare_column,
            self.summary_operator,
            &self.options,
        )
    }
}

/// Runs the slice-compare intent and returns a new table.
///
/// Output columns are the dimensions, with the compared column last, followed
/// by the metric aggregated with `summary_operator`. The input table and
/// `dimensions` are left untouched.
pub fn slice_compare(
    table: &Table,
    metric: &str,
    dimensions: &[String],
    slices: Option<&SliceSpec>,
    slice_compare_column: &SliceCompareColumn,
    summary_operator: SummaryOperator,
    options: &SliceCompareOptions,
) -> Result<Table, IntentError> {
    validate_inputs(table, metric, dimensions, slices, slice_compare_column, options)?;

    let table = apply_date_range(
        table,
        options.date_range.as_ref(),
        &options.date_column_name,
        &options.date_format,
    )?;
    debug!(target: "slice_compare::intent", rows = table.row_count(), "Date range applied");

    let table = slice_table(&table, slices)?;
    debug!(target: "slice_compare::intent", rows = table.row_count(), "Slices applied");

    let mut required_columns = dimensions.to_vec();
    required_columns.push(metric.to_string());
    let table = crop_other_columns(&table, &required_columns)?;

    let group_columns = move_to_end(dimensions, slice_compare_column.column());
    let table = group_by(&table, &group_columns, summary_operator)?;

    info!(
        target: "slice_compare::intent",
        metric,
        compare = slice_compare_column.column(),
        operator = summary_operator.as_str(),
        groups = table.row_count(),
        "Slice compare finished"
    );
    Ok(table)
}

/// Fails before any data is touched if a referenced column is missing or the
/// compared column is not one of the dimensions.
fn validate_inputs(
    table: &Table,
    metric: &str,
    dimensions: &[String],
    slices: Option<&SliceSpec>,
    slice_compare_column: &SliceCompareColumn,
    options: &SliceCompareOptions,
) -> Result<(), IntentError> {
    table.require_column(metric)?;
    for dim in dimensions {
        table.require_column(dim)?;
    }
    if let Some(spec) = slices {
        validate_slices(table, spec)?;
    }
    if options.date_range.is_some() {
        table.require_column(&options.date_column_name)?;
    }
    if !dimensions.iter().any(|d| d == slice_compare_column.column()) {
        return Err(IntentError::InvalidParameter(format!(
            "slice_compare_column '{}' is not one of the dimensions {:?}",
            slice_compare_column.column(),
            dimensions
        )));
    }
    Ok(())
}

/// Copy of `dimensions` with the first occurrence of `column` moved last.
fn move_to_end(dimensions: &[String], column: &str) -> Vec<String> {
    let mut reordered = dimensions.to_vec();
    if let Some(pos) = reordered.iter().position(|d| d == column) {
        let moved = reordered.remove(pos);
        reordered.push(moved);
    }
    reordered
}
