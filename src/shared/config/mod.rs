pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{
    CONFIG_ENV_VAR, LoggingConfig, QueryConfig, Settings, load_settings, load_settings_from,
};
