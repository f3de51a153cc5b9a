use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::shared::config::model::{Settings, load_settings};

/// Process-wide settings, loaded on first access.
///
/// A missing config file yields defaults; a malformed one panics here.
pub static CONFIG: Lazy<Arc<Settings>> = Lazy::new(|| {
    let settings = load_settings().expect("Failed to load configuration");
    Arc::new(settings)
});
