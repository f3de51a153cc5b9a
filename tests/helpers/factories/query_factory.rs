use crate::engine::ops::{DateRange, SliceCondition, SliceSpec, SummaryOperator};
use crate::intent::{SliceCompareColumn, SliceCompareOptions, SliceCompareQuery};

/// Builds the India vs Australia runs comparison by default.
pub struct QueryFactory {
    metric: String,
    dimensions: Vec<String>,
    slices: Option<SliceSpec>,
    slice_compare_column: SliceCompareColumn,
    summary_operator: SummaryOperator,
    options: SliceCompareOptions,
}

impl QueryFactory {
    pub fn new() -> Self {
        Self {
            metric: "runs".to_string(),
            dimensions: vec!["team".to_string(), "player".to_string()],
            slices: None,
            slice_compare_column: SliceCompareColumn::new("team", ["India", "Australia"]),
            summary_operator: SummaryOperator::Sum,
            options: SliceCompareOptions::default(),
        }
    }

    pub fn with_metric(mut self, metric: &str) -> Self {
        self.metric = metric.to_string();
        self
    }

    pub fn with_dimensions(mut self, dims: &[&str]) -> Self {
        self.dimensions = dims.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_slice(mut self, column: &str, condition: impl Into<SliceCondition>) -> Self {
        self.slices
            .get_or_insert_with(SliceSpec::new)
            .insert(column.to_string(), condition.into());
        self
    }

    pub fn with_compare_column(mut self, column: SliceCompareColumn) -> Self {
        self.slice_compare_column = column;
        self
    }

    pub fn with_operator(mut self, op: SummaryOperator) -> Self {
        self.summary_operator = op;
        self
    }

    pub fn with_date_range(mut self, start: &str, end: &str) -> Self {
        self.options = self.options.with_date_range(DateRange::new(start, end));
        self
    }

    pub fn with_options(mut self, options: SliceCompareOptions) -> Self {
        self.options = options;
        self
    }

    pub fn create(self) -> SliceCompareQuery {
        SliceCompareQuery {
            metric: self.metric,
            dimensions: self.dimensions,
            slices: self.slices,
            slice_compare_column: self.slice_compare_column,
            summary_operator: self.summary_operator,
            options: self.options,
        }
    }
}
