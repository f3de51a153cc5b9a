pub mod column;
pub mod table;

pub use column::Column;
pub use table::{Record, Table};
