//! API registry extraction.
//!
//! Turns a bundled declaration document into a [`ModuleRegistry`] of
//! documented functions, classes and variables grouped by source module.
//!
//! [`ModuleRegistry`]: crate::types::ModuleRegistry

pub mod builder;
pub mod doc_block;
pub mod scan;

pub use builder::{ApiRegistryBuilder, Chunk, Origin};
pub use scan::Declaration;
