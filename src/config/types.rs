//! Configuration Types
//!
//! All configuration structures with defaults matching the layout of the
//! `@types/p5` package and the p5.js release repository.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants;
use crate::types::{BundleError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Naming of the generated artifacts
    pub project: ProjectConfig,

    /// Input and output locations
    pub paths: PathsConfig,

    /// Reference resolution settings
    pub bundle: BundleConfig,

    /// Documentation rendering settings
    pub docs: DocsConfig,

    /// Optional external Markdown-to-help converter
    pub converter: ConverterConfig,

    /// Module-asset fetch settings
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            project: ProjectConfig::default(),
            paths: PathsConfig::default(),
            bundle: BundleConfig::default(),
            docs: DocsConfig::default(),
            converter: ConverterConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `BundleError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(BundleError::Config(
                "project.name must not be empty".to_string(),
            ));
        }

        if self
            .project
            .name
            .contains(|c: char| c.is_whitespace() || c == '/')
        {
            return Err(BundleError::Config(format!(
                "project.name is used in file names and must not contain spaces or '/': {}",
                self.project.name
            )));
        }

        if self.bundle.max_depth == 0 {
            return Err(BundleError::Config(
                "bundle.max_depth must be greater than 0".to_string(),
            ));
        }

        if self.converter.enabled && self.converter.program.trim().is_empty() {
            return Err(BundleError::Config(
                "converter.program must be set when the converter is enabled".to_string(),
            ));
        }

        url::Url::parse(&self.fetch.repository).map_err(|e| {
            BundleError::Config(format!(
                "Invalid fetch.repository URL '{}': {}",
                self.fetch.repository, e
            ))
        })?;

        Ok(())
    }
}

// =============================================================================
// Project Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Namespace exported by the bundle and prefix of every help page
    pub name: String,

    /// Human-readable library title
    pub title: String,

    /// Label recorded in the bundle header
    pub source_label: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "p5".to_string(),
            title: "p5.js".to_string(),
            source_label: "@types/p5 package".to_string(),
        }
    }
}

// =============================================================================
// Paths
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Namespace-style entry declaration file
    pub entry: PathBuf,

    /// Global-scope declaration file
    pub global: PathBuf,

    /// Package manifest supplying the documented version
    pub manifest: PathBuf,

    /// Where the bundled declaration file is written
    pub bundle_output: PathBuf,

    /// Directory receiving Markdown and help pages
    pub docs_dir: PathBuf,

    /// Directory receiving fetched library sources
    pub libs_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("node_modules/@types/p5/index.d.ts"),
            global: PathBuf::from("node_modules/@types/p5/global.d.ts"),
            manifest: PathBuf::from("node_modules/@types/p5/package.json"),
            bundle_output: PathBuf::from("assets/types/p5.d.ts"),
            docs_dir: PathBuf::from("doc"),
            libs_dir: PathBuf::from("assets/libs"),
        }
    }
}

// =============================================================================
// Bundle
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Maximum nesting of reference directives before a failure marker is emitted
    pub max_depth: usize,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            max_depth: constants::resolver::DEFAULT_MAX_DEPTH,
        }
    }
}

// =============================================================================
// Documentation
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Version override; the package manifest is consulted when unset
    pub version: Option<String>,

    /// Icon for modules without an entry in `icons`
    pub default_icon: String,

    /// Module name to index icon
    pub icons: IndexMap<String, String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        let icons = [
            ("core", "⚙️"),
            ("color", "🎨"),
            ("shape", "🔷"),
            ("math", "🧮"),
            ("image", "🖼️"),
            ("typography", "🔤"),
            ("io", "💾"),
            ("events", "🖱️"),
            ("dom", "🌐"),
            ("data", "📊"),
            ("environment", "🌍"),
            ("rendering", "🖌️"),
            ("structure", "🏗️"),
            ("transform", "🔄"),
            ("utilities", "🧰"),
            ("webgl", "🧊"),
            ("accessibility", "♿"),
            ("sound", "🔊"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            version: None,
            default_icon: constants::docs::DEFAULT_ICON.to_string(),
            icons,
        }
    }
}

// =============================================================================
// Converter
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Try the external converter before the in-process help renderer
    pub enabled: bool,

    /// Program reading Markdown on stdin and writing help text on stdout
    pub program: String,

    /// Arguments passed to `program`
    pub args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "pandoc".to_string(),
            args: vec![
                "-f".to_string(),
                "markdown".to_string(),
                "-t".to_string(),
                "vimdoc".to_string(),
            ],
        }
    }
}

// =============================================================================
// Fetch
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Git repository holding the library releases
    pub repository: String,

    /// Files copied from the cloned release into the libs directory
    pub files: Vec<FetchFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFile {
    /// Path inside the repository
    pub source: PathBuf,
    /// File name inside the libs directory
    pub dest: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            repository: constants::fetch::DEFAULT_REPOSITORY.to_string(),
            files: vec![
                FetchFile {
                    source: PathBuf::from("src/app.js"),
                    dest: "p5.js".to_string(),
                },
                FetchFile {
                    source: PathBuf::from("lib/addons/p5.sound.js"),
                    dest: "p5.sound.js".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.project.name, "p5");
        assert_eq!(config.docs.icons.get("math").map(String::as_str), Some("🧮"));
    }

    #[test]
    fn test_rejects_zero_depth() {
        let mut config = Config::default();
        config.bundle.max_depth = 0;
        assert!(matches!(config.validate(), Err(BundleError::Config(_))));
    }

    #[test]
    fn test_rejects_name_with_spaces() {
        let mut config = Config::default();
        config.project.name = "my lib".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_repository() {
        let mut config = Config::default();
        config.fetch.repository = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_converter_may_be_blank_when_disabled() {
        let mut config = Config::default();
        config.converter.enabled = false;
        config.converter.program = String::new();
        assert!(config.validate().is_ok());
    }
}
