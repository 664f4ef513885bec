//! Configuration management for remux.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Defaults for every field, so a partial file is valid
//! - Atomic file writes (write to temp, then rename)
//!
//! # Example
//!
//! ```no_run
//! use remux_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("remux.toml");
//! config.load_or_default().unwrap();
//!
//! println!("mkvmerge: {}", config.settings().tools.mkvmerge);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    LoggingSettings, OverrideSettings, Settings, ToolSettings, DEFAULT_GLOBAL_OVERRIDES,
    DEFAULT_TRACK_OVERRIDES,
};
