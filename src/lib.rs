pub mod engine;
pub mod intent;
pub mod logging;
pub mod shared;

pub use engine::errors::{IntentError, TableError};
pub use engine::ops::{DateRange, SliceCondition, SliceSpec, SummaryOperator};
pub use engine::table::{Column, Table};
pub use engine::types::ScalarValue;
pub use intent::{SliceCompareColumn, SliceCompareOptions, SliceCompareQuery, slice_compare};

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
