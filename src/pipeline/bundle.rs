//! Bundle stage: resolve both roots, compose, write.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bundler::{DocumentComposer, ReferenceResolver};
use crate::config::Config;
use crate::types::{ArtifactKind, InputRole, OutputArtifact, Result};

#[derive(Debug, Clone)]
pub struct BundleSummary {
    pub output: PathBuf,
    pub bytes: usize,
    pub lines: usize,
    pub inlined: usize,
    /// Directives replaced by a failure marker
    pub failed: Vec<String>,
    /// Names declared in both the entry and the global section
    pub overlapping: Vec<String>,
}

pub fn run(config: &Config, root: &Path) -> Result<BundleSummary> {
    let resolver = ReferenceResolver::new(config.bundle.max_depth);

    // Independent calls: each root gets its own visited set.
    let entry = resolver.resolve_file(&root.join(&config.paths.entry), InputRole::Entry)?;
    let global = resolver.resolve_file(&root.join(&config.paths.global), InputRole::Global)?;
    info!(
        "Resolved {} entry and {} global references",
        entry.inlined.len(),
        global.inlined.len()
    );

    let composed = DocumentComposer::new(&config.project.name, &config.project.title)
        .with_source_label(&config.project.source_label)
        .compose(&entry.text, &global.text);
    if !composed.overlapping.is_empty() {
        warn!(
            "{} names declared in both entry and global sections: {}",
            composed.overlapping.len(),
            composed.overlapping.join(", ")
        );
    }

    let artifact = OutputArtifact::new(
        ArtifactKind::Bundle,
        root.join(&config.paths.bundle_output),
        composed.text,
    );
    let bytes = artifact.content.len();
    let lines = artifact.line_count();
    let output = artifact.write()?;
    info!(
        "Bundled declarations written to {} ({} bytes, {} lines)",
        output.display(),
        bytes,
        lines
    );

    let mut failed = entry.failed;
    failed.extend(global.failed);

    Ok(BundleSummary {
        output,
        bytes,
        lines,
        inlined: entry.inlined.len() + global.inlined.len(),
        failed,
        overlapping: composed.overlapping,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BundleError;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> Config {
        let mut config = Config::default();
        config.paths.entry = PathBuf::from("types/index.d.ts");
        config.paths.global = PathBuf::from("types/global.d.ts");
        config.paths.bundle_output = PathBuf::from("out/p5.d.ts");
        config
    }

    #[test]
    fn test_writes_bundle_with_both_sections() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("types/src/color")).unwrap();
        fs::write(
            temp.path().join("types/index.d.ts"),
            "/// <reference path=\"./src/color/setting.d.ts\" />\ndeclare class p5 {}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("types/src/color/setting.d.ts"),
            "declare function fill(v: number): void;\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("types/global.d.ts"),
            "/// <reference path=\"./missing.d.ts\" />\ndeclare function setup(): void;\n",
        )
        .unwrap();

        let summary = run(&config(), temp.path()).unwrap();

        assert_eq!(summary.inlined, 1);
        assert_eq!(summary.failed, vec!["./missing.d.ts"]);
        let text = fs::read_to_string(&summary.output).unwrap();
        assert!(text.contains("// Inlined from: ./src/color/setting.d.ts"));
        assert!(text.contains("declare function setup(): void;"));
        assert_eq!(summary.lines, text.lines().count());
    }

    #[test]
    fn test_missing_global_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("types")).unwrap();
        fs::write(temp.path().join("types/index.d.ts"), "declare class p5 {}\n").unwrap();

        let err = run(&config(), temp.path()).unwrap_err();
        assert!(matches!(
            err,
            BundleError::InputMissing {
                role: InputRole::Global,
                ..
            }
        ));
        assert!(!err.is_stage_local());
        assert!(!temp.path().join("out/p5.d.ts").exists());
    }
}
