//! Config Command
//!
//! Manage dtsbundle configuration.
//!
//! Usage:
//!   dtsbundle config show [-g] [-f toml|json|yaml]
//!   dtsbundle config path
//!   dtsbundle config init [-g] [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::{ConfigFormat, ConfigLoader};
use crate::types::{BundleError, Result};

/// Show the effective configuration, or the raw global file with `global`
pub fn show(config_path: Option<&Path>, global: bool, format: &str) -> Result<()> {
    if global {
        match ConfigLoader::global_config_path() {
            Some(global_path) if global_path.exists() => {
                let content = std::fs::read_to_string(&global_path)?;
                println!("# Global Config: {}\n", global_path.display());
                println!("{}", content);
            }
            Some(_) => {
                println!("No global config found.");
                println!("Run 'dtsbundle config init --global' to create one.");
            }
            None => println!("Cannot determine global config directory."),
        }
        return Ok(());
    }

    let format: ConfigFormat = format.parse().map_err(BundleError::Config)?;
    let config = ConfigLoader::load_with(config_path)?;
    println!("{}", ConfigLoader::render(&config, format)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn init(global: bool, force: bool, out: &Output) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(&std::env::current_dir()?, force)?
    };
    out.success(&format!(
        "Initialized {} configuration",
        if global { "global" } else { "project" }
    ));
    out.detail("Config", path.display());
    Ok(())
}
