//! Unified Error Type System
//!
//! Centralized error types for the bundling and documentation pipeline.
//!
//! Only fatal conditions are represented here. Recoverable situations
//! (an unreadable referenced file, a missing converter) are logged as
//! warnings by the stage that meets them and never surface as `Err`.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Input Roles
// =============================================================================

/// Which root input a missing-file error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// Namespace-style entry declaration file
    Entry,
    /// Global-scope declaration file
    Global,
}

impl std::fmt::Display for InputRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Global => write!(f, "global"),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum BundleError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    /// A root declaration file could not be read
    #[error("Missing {role} declaration file: {}", path.display())]
    InputMissing { role: InputRole, path: PathBuf },

    /// The documentation stage ran before any bundle was produced
    #[error("Bundled declarations not found at {}: run the bundle stage first", path.display())]
    BundleMissing { path: PathBuf },

    /// Package metadata exists but cannot be interpreted
    #[error("Malformed package manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    // -------------------------------------------------------------------------
    // Output Errors
    // -------------------------------------------------------------------------
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Converter failed: {0}")]
    Converter(String),

    #[error("Stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl BundleError {
    /// Wrap an IO error that happened while writing `path`
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is confined to the stage that raised it.
    ///
    /// Input and configuration problems poison every later stage as well,
    /// collaborator failures do not.
    pub fn is_stage_local(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::Converter(_) | Self::Stage { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;
