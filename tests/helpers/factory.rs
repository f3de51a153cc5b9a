pub use super::factories::{QueryFactory, TableFactory};

pub struct Factory;

impl Factory {
    pub fn cricket_table() -> TableFactory {
        TableFactory::cricket()
    }

    pub fn query() -> QueryFactory {
        QueryFactory::new()
    }
}
