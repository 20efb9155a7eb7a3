//! API Registry Builder
//!
//! Mines a bundled declaration document for documented API surface.
//!
//! ## Chunking
//!
//! The document is split on the provenance lines left by the resolver
//! (`// Inlined from: <path>`). Each chunk runs from its marker to the next
//! marker or the next section banner, whichever comes first. Text before the
//! first marker and text between a banner and the following marker is
//! unattributed and ignored.
//!
//! ## Attribution
//!
//! A marker path shaped like `…/<module>/<subModule>.<ext>` names the module
//! and sub-module of everything in its chunk. Other paths leave the origin
//! unset and their declarations join the most recently seen module (or the
//! fallback module when none has been seen yet).

use regex::Regex;
use std::sync::LazyLock;

use tracing::debug;

use super::{doc_block, scan};
use crate::constants::{docs::FALLBACK_MODULE, resolver::INLINED_FROM};
use crate::types::{ApiElement, ModuleRegistry};

static PROVENANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*{}(\S+)[ \t]*$",
        regex::escape(INLINED_FROM)
    ))
    .expect("provenance pattern")
});

static BANNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^// ={10,}[ \t]*$").expect("banner pattern"));

static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|/)([A-Za-z0-9_-]+)/([A-Za-z0-9_-]+)\.[A-Za-z0-9.]+$").expect("origin pattern")
});

/// Module and sub-module named by a provenance path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub module: String,
    pub sub_module: String,
}

impl Origin {
    /// Parse `…/<module>/<subModule>.<ext>`; `None` for any other shape
    pub fn from_path(path: &str) -> Option<Self> {
        let caps = ORIGIN_RE.captures(path)?;
        Some(Self {
            module: caps.get(1)?.as_str().to_string(),
            sub_module: caps.get(2)?.as_str().to_string(),
        })
    }
}

/// One attributed slice of the bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub path: &'a str,
    pub content: &'a str,
}

pub struct ApiRegistryBuilder {
    fallback_module: String,
}

impl Default for ApiRegistryBuilder {
    fn default() -> Self {
        Self {
            fallback_module: FALLBACK_MODULE.to_string(),
        }
    }
}

impl ApiRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_module(mut self, name: &str) -> Self {
        self.fallback_module = name.to_string();
        self
    }

    /// Split the bundle into marker-delimited chunks
    pub fn chunks(bundled: &str) -> Vec<Chunk<'_>> {
        for line in Self::unparsed_markers(bundled) {
            debug!("Ignoring provenance marker not on a line of its own: {}", line.trim());
        }

        let markers: Vec<_> = PROVENANCE_RE
            .captures_iter(bundled)
            .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?.as_str())))
            .collect();

        markers
            .iter()
            .enumerate()
            .map(|(i, (whole, path))| {
                let start = whole.end();
                let next_marker = markers
                    .get(i + 1)
                    .map_or(bundled.len(), |(next, _)| next.start());
                let end = BANNER_RE
                    .find_at(bundled, start)
                    .map_or(next_marker, |banner| banner.start().min(next_marker));
                Chunk {
                    path,
                    content: &bundled[start..end],
                }
            })
            .collect()
    }

    /// Lines mentioning the provenance marker that do not delimit a chunk
    pub(crate) fn unparsed_markers(bundled: &str) -> Vec<&str> {
        bundled
            .lines()
            .filter(|line| line.contains(INLINED_FROM) && !PROVENANCE_RE.is_match(line))
            .collect()
    }

    pub fn build(&self, bundled: &str) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        let mut current: Option<String> = None;
        let mut skipped = 0usize;

        for chunk in Self::chunks(bundled) {
            let origin = Origin::from_path(chunk.path);
            if let Some(origin) = &origin {
                registry.entry(&origin.module);
                current = Some(origin.module.clone());
            }

            let declarations = scan::all(chunk.content);
            if declarations.is_empty() {
                continue;
            }

            let module = current.as_deref().unwrap_or(&self.fallback_module);
            let record = registry.entry(module);
            for decl in declarations {
                let element = ApiElement::new(decl.name, decl.kind)
                    .with_description(doc_block::clean(decl.doc))
                    .with_origin(
                        origin.as_ref().map(|o| o.module.as_str()),
                        origin.as_ref().map(|o| o.sub_module.as_str()),
                    );
                if !record.push(element) {
                    skipped += 1;
                }
            }
        }

        debug!(
            "Registry built: {} modules, {} elements ({} duplicates skipped)",
            registry.len(),
            registry.element_count(),
            skipped
        );
        registry
    }
}
