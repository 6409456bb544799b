//! Application Configuration Module
//!
//! Display, input-checking and logging settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `WELLFORM_CONFIG` environment variable (path to TOML file)
//! 2. `wellform.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! // In main():
//! config::init(FormConfig::load());
//!
//! // Anywhere else:
//! let decimals = config::get().decimals();
//! ```

mod app_config;
pub mod validation;

pub use app_config::*;

use std::sync::OnceLock;

static FORM_CONFIG: OnceLock<FormConfig> = OnceLock::new();
static DEFAULT_CONFIG: OnceLock<FormConfig> = OnceLock::new();

/// Initialize the global configuration. Later calls are ignored.
pub fn init(config: FormConfig) {
    if FORM_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// The global configuration, or the built-in defaults if `init()` was
/// never called (library use without a binary).
pub fn get() -> &'static FormConfig {
    FORM_CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT_CONFIG.get_or_init(FormConfig::default))
}

pub fn is_initialized() -> bool {
    FORM_CONFIG.get().is_some()
}
