//! dtsbundle - Declaration Bundler and API Documentation Generator
//!
//! Flattens a tree of TypeScript declaration files into one bundled
//! document, mines it for documented API surface and renders that surface
//! as Markdown, per-module help pages and a master index.
//!
//! ## Pipeline
//!
//! ```text
//! ReferenceResolver -> ModuleContentExtractor -> DocumentComposer
//!     -> ApiRegistryBuilder -> MultiFormatRenderer
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use dtsbundle::{ConfigLoader, Pipeline, RunOptions};
//!
//! let pipeline = Pipeline::new(ConfigLoader::load_with(None)?);
//! let report = pipeline.run(&RunOptions::default());
//! assert!(report.is_success());
//! ```
//!
//! ## Modules
//!
//! - [`bundler`]: reference resolution, module unwrapping, composition
//! - [`registry`]: documented-declaration mining
//! - [`render`]: Markdown, help-dialect and index rendering
//! - [`pipeline`]: stage orchestration (bundle, fetch, docs)
//! - [`config`]: layered configuration

pub mod bundler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{BundleError, InputRole, Result};

// Data Model
pub use types::{
    ApiElement, ApiKind, ArtifactKind, ModuleRecord, ModuleRegistry, OutputArtifact, Section,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use bundler::{DocumentComposer, ModuleContentExtractor, ReferenceResolver};
pub use pipeline::{Pipeline, RunOptions, RunReport, Stage};
pub use registry::ApiRegistryBuilder;
pub use render::{IconTable, MultiFormatRenderer, RenderContext};
