pub mod errors;
pub mod ops;
pub mod table;
pub mod types;

pub use errors::*;
