//! Reference Resolution
//!
//! Recursively inlines `/// <reference path="…" />` directives.
//!
//! ## Semantics
//!
//! - Directives are processed in order of appearance, depth-first.
//! - Each inlined block is preceded by a provenance line
//!   (`// Inlined from: <literal path>`) and passed through
//!   [`ModuleContentExtractor`].
//! - The visited set belongs to one top-level call and is threaded through
//!   the recursion: a target already inlined anywhere in the same call tree
//!   keeps its directive text untouched. Independent calls never share it.
//! - A missing or unreadable target is replaced by a failure line and a
//!   warning; resolution carries on with the remaining directives.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::directive::{self, Directive};
use super::extractor::ModuleContentExtractor;
use crate::constants::resolver::{DEFAULT_MAX_DEPTH, FAILED_TO_RESOLVE, INLINED_FROM};
use crate::types::{BundleError, InputRole, Result};

/// Targets already inlined within one resolution call tree
pub type VisitedSet = HashSet<PathBuf>;

/// Text with every directive replaced, plus what happened to each one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub text: String,
    /// Literal paths inlined, in traversal order
    pub inlined: Vec<String>,
    /// Literal paths replaced by a failure marker
    pub failed: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    max_depth: usize,
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl ReferenceResolver {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Resolve `content` whose relative directives point below `base`
    pub fn resolve(&self, content: &str, base: &Path) -> ResolvedDocument {
        let mut visited = VisitedSet::new();
        self.resolve_with(content, base, &mut visited)
    }

    /// Resolve with a caller-owned visited set
    pub fn resolve_with(
        &self,
        content: &str,
        base: &Path,
        visited: &mut VisitedSet,
    ) -> ResolvedDocument {
        let mut doc = ResolvedDocument::default();
        let text = self.resolve_at(content, base, visited, 0, &mut doc);
        ResolvedDocument { text, ..doc }
    }

    /// Read and resolve a root declaration file.
    ///
    /// The root itself counts as visited, so a file referencing its own
    /// entry point does not inline it a second time.
    pub fn resolve_file(&self, path: &Path, role: InputRole) -> Result<ResolvedDocument> {
        let file = directive::DeclarationFile::read(path).map_err(|e| match e {
            BundleError::Io(_) => BundleError::InputMissing {
                role,
                path: path.to_path_buf(),
            },
            other => other,
        })?;
        debug!(
            "Resolving {} ({} directives)",
            path.display(),
            file.directives.len()
        );

        let mut visited = VisitedSet::new();
        visited.insert(directive::normalize(path));
        Ok(self.resolve_with(&file.raw_text, &file.base_dir(), &mut visited))
    }

    fn resolve_at(
        &self,
        content: &str,
        base: &Path,
        visited: &mut VisitedSet,
        depth: usize,
        doc: &mut ResolvedDocument,
    ) -> String {
        let directives = directive::scan(content, base);
        if directives.is_empty() {
            return content.to_string();
        }

        let mut out = String::with_capacity(content.len());
        let mut cursor = 0;

        for d in directives {
            out.push_str(&content[cursor..d.span.start]);
            cursor = d.span.end;

            if visited.contains(&d.resolved_path) {
                debug!("Skipping already inlined reference: {}", d.literal_path);
                out.push_str(&content[d.span.clone()]);
                continue;
            }

            if depth >= self.max_depth {
                warn!(
                    "Reference nesting exceeds {} levels at: {}",
                    self.max_depth, d.literal_path
                );
                Self::push_failure(&mut out, &d, doc);
                continue;
            }

            match fs::read_to_string(&d.resolved_path) {
                Ok(raw) => {
                    // Marked before descending so a cycle degrades to literal text.
                    visited.insert(d.resolved_path.clone());
                    doc.inlined.push(d.literal_path.clone());

                    let nested_base = d
                        .resolved_path
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| PathBuf::from("."));
                    let nested = self.resolve_at(&raw, &nested_base, visited, depth + 1, doc);

                    out.push_str(INLINED_FROM);
                    out.push_str(&d.literal_path);
                    out.push('\n');
                    out.push_str(&ModuleContentExtractor::extract(&nested));
                }
                Err(e) => {
                    warn!("Could not resolve reference: {} ({})", d.literal_path, e);
                    Self::push_failure(&mut out, &d, doc);
                }
            }
        }

        out.push_str(&content[cursor..]);
        out
    }

    fn push_failure(out: &mut String, d: &Directive, doc: &mut ResolvedDocument) {
        out.push_str(FAILED_TO_RESOLVE);
        out.push_str(&d.literal_path);
        doc.failed.push(d.literal_path.clone());
    }
}
