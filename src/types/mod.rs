pub mod api;
pub mod artifact;
pub mod error;

pub use api::{ApiElement, ApiKind, ModuleRecord, ModuleRegistry, Section};
pub use artifact::{ArtifactKind, OutputArtifact};
pub use error::{BundleError, InputRole, Result};
