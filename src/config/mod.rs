//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/dtsbundle/config.toml)
//! 3. Project config (dtsbundle.toml)
//! 4. Environment variables (DTSBUNDLE_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::{ConfigFormat, ConfigLoader, PROJECT_CONFIG_FILE};
pub use types::*;
