//! Declaration bundling
//!
//! Flattens a tree of declaration files into one document:
//! [`ReferenceResolver`] inlines reference directives, [`ModuleContentExtractor`]
//! unwraps each inlined file, and [`DocumentComposer`] assembles the final text.

pub mod composer;
pub mod directive;
pub mod extractor;
pub mod resolver;

pub use composer::{ComposedDocument, DocumentComposer};
pub use directive::{DeclarationFile, Directive};
pub use extractor::ModuleContentExtractor;
pub use resolver::{ReferenceResolver, ResolvedDocument, VisitedSet};
