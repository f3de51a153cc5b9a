//! Generic table operations the intents are composed from.
//!
//! Every operation takes a table by reference and returns a new one.

pub mod aggregate;
pub mod crop;
pub mod date_range;
pub mod group_by;
pub mod slice;

pub use aggregate::{AggregatorImpl, SummaryOperator};
pub use crop::crop_other_columns;
pub use date_range::{DateRange, apply_date_range};
pub use group_by::group_by;
pub use slice::{SliceCondition, SliceSpec, slice_table, validate_slices};

#[cfg(test)]
mod crop_test;
