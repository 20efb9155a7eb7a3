//! Documentation stage.
//!
//! Reads the bundled declarations, builds the registry once and writes the
//! combined Markdown page, one help page per module and the index. When an
//! external converter is enabled it supplies the help pages; the built-in
//! renderer takes over for good after its first failure.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::converter::ExternalConverter;
use crate::config::Config;
use crate::constants::docs::UNKNOWN_VERSION;
use crate::registry::ApiRegistryBuilder;
use crate::render::{IconTable, MultiFormatRenderer, RenderContext};
use crate::types::{ArtifactKind, BundleError, ModuleRegistry, OutputArtifact, Result};

#[derive(Debug, Clone)]
pub struct DocsSummary {
    pub version: String,
    pub modules: usize,
    pub elements: usize,
    /// Help pages produced by the external converter
    pub converted: usize,
    pub written: Vec<PathBuf>,
}

pub fn run(config: &Config, root: &Path) -> Result<DocsSummary> {
    let bundle_path = root.join(&config.paths.bundle_output);
    if !bundle_path.is_file() {
        return Err(BundleError::BundleMissing { path: bundle_path });
    }
    let bundled = fs::read_to_string(&bundle_path)?;

    let version = resolve_version(config, root)?;
    let registry = ApiRegistryBuilder::new().build(&bundled);
    if registry.element_count() == 0 {
        warn!(
            "No documented declarations found in {}",
            bundle_path.display()
        );
    }
    info!(
        "Registry: {} modules, {} elements (version {})",
        registry.len(),
        registry.element_count(),
        version
    );

    let renderer = MultiFormatRenderer::new(
        RenderContext::new(&config.project.name, &config.project.title, &version),
        IconTable::from_config(&config.docs),
    );
    let mut artifacts = renderer.render(&registry, &root.join(&config.paths.docs_dir));
    let converted = apply_converter(
        &mut artifacts,
        &registry,
        &renderer,
        ExternalConverter::from_config(&config.converter),
    );

    let written = artifacts
        .into_iter()
        .map(OutputArtifact::write)
        .collect::<Result<Vec<_>>>()?;
    info!("Wrote {} documentation files", written.len());

    Ok(DocsSummary {
        version,
        modules: registry.len(),
        elements: registry.element_count(),
        converted,
        written,
    })
}

fn apply_converter(
    artifacts: &mut [OutputArtifact],
    registry: &ModuleRegistry,
    renderer: &MultiFormatRenderer,
    mut converter: Option<ExternalConverter>,
) -> usize {
    let mut converted = 0;
    for artifact in artifacts.iter_mut() {
        let Some(active) = converter.as_ref() else {
            break;
        };
        let ArtifactKind::HelpPage { module } = &artifact.kind else {
            continue;
        };
        let Some(record) = registry.get(module) else {
            continue;
        };

        match active.convert(&renderer.module_markdown(record)) {
            Ok(text) => {
                debug!("Converted help page for {} with {}", module, active.program());
                artifact.content = text;
                converted += 1;
            }
            Err(e) => {
                warn!("{}; falling back to the built-in help renderer", e);
                converter = None;
            }
        }
    }
    converted
}

/// Version shown on every page.
///
/// Config override first, then the manifest's `version` field. A missing
/// manifest (or one without a version) yields `unknown`; an unreadable or
/// malformed one is an error.
pub fn resolve_version(config: &Config, root: &Path) -> Result<String> {
    if let Some(version) = &config.docs.version {
        return Ok(version.clone());
    }

    let path = root.join(&config.paths.manifest);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("No package manifest at {}", path.display());
            return Ok(UNKNOWN_VERSION.to_string());
        }
        Err(e) => return Err(e.into()),
    };

    let manifest: Value = serde_json::from_str(&text).map_err(|e| BundleError::Manifest {
        path: path.clone(),
        message: e.to_string(),
    })?;
    match manifest.get("version") {
        None | Some(Value::Null) => Ok(UNKNOWN_VERSION.to_string()),
        Some(Value::String(v)) => Ok(v.clone()),
        Some(other) => Err(BundleError::Manifest {
            path,
            message: format!("version must be a string, found {}", other),
        }),
    }
}
