pub mod query_factory;
pub mod table_factory;

pub use query_factory::QueryFactory;
pub use table_factory::TableFactory;
