//! Stage Orchestration
//!
//! Runs bundle -> fetch -> docs against a configuration whose relative paths
//! are anchored at a root directory.
//!
//! ## Failure policy
//!
//! - Stage-local failures (fetch, converter) are reported and the remaining
//!   stages still run.
//! - Anything else (missing inputs, unwritable outputs, malformed metadata)
//!   aborts the run; later stages are not attempted.
//!
//! Either way the run is unsuccessful and the binary exits non-zero.

pub mod bundle;
pub mod converter;
pub mod docs;
pub mod fetch;

use std::path::{Path, PathBuf};

use tracing::{error, info};

pub use bundle::BundleSummary;
pub use converter::ExternalConverter;
pub use docs::DocsSummary;
pub use fetch::FetchSummary;

use crate::config::Config;
use crate::types::{BundleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Bundle,
    Fetch,
    Docs,
}

impl Stage {
    pub const ORDER: [Stage; 3] = [Stage::Bundle, Stage::Fetch, Stage::Docs];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Bundle => "bundle",
            Stage::Fetch => "fetch",
            Stage::Docs => "docs",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which stages `run` leaves out
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub skip_types: bool,
    pub skip_modules: bool,
    pub skip_docs: bool,
}

impl RunOptions {
    pub fn skips(&self, stage: Stage) -> bool {
        match stage {
            Stage::Bundle => self.skip_types,
            Stage::Fetch => self.skip_modules,
            Stage::Docs => self.skip_docs,
        }
    }
}

/// What one stage produced
#[derive(Debug, Clone)]
pub enum StageOutput {
    Bundle(BundleSummary),
    Fetch(FetchSummary),
    Docs(DocsSummary),
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub completed: Vec<StageOutput>,
    pub failed: Vec<(Stage, BundleError)>,
    pub skipped: Vec<Stage>,
    /// Stages never attempted because an earlier failure aborted the run
    pub aborted: Vec<Stage>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Pipeline {
    config: Config,
    root: PathBuf,
}

impl Pipeline {
    /// Pipeline rooted at the current directory
    pub fn new(config: Config) -> Self {
        Self::with_root(config, PathBuf::from("."))
    }

    pub fn with_root(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bundle(&self) -> Result<BundleSummary> {
        bundle::run(&self.config, &self.root)
    }

    pub fn fetch(&self) -> Result<FetchSummary> {
        fetch::run(&self.config, &self.root)
    }

    pub fn docs(&self) -> Result<DocsSummary> {
        docs::run(&self.config, &self.root)
    }

    pub fn run_stage(&self, stage: Stage) -> Result<StageOutput> {
        Ok(match stage {
            Stage::Bundle => StageOutput::Bundle(self.bundle()?),
            Stage::Fetch => StageOutput::Fetch(self.fetch()?),
            Stage::Docs => StageOutput::Docs(self.docs()?),
        })
    }

    pub fn run(&self, options: &RunOptions) -> RunReport {
        let mut report = RunReport::default();

        for (i, stage) in Stage::ORDER.into_iter().enumerate() {
            if options.skips(stage) {
                info!("Skipping {} stage", stage);
                report.skipped.push(stage);
                continue;
            }

            info!("Running {} stage", stage);
            match self.run_stage(stage) {
                Ok(output) => report.completed.push(output),
                Err(e) => {
                    error!("{} stage failed: {}", stage, e);
                    let fatal = !e.is_stage_local();
                    report.failed.push((stage, e));
                    if fatal {
                        report.aborted = Stage::ORDER[i + 1..]
                            .iter()
                            .copied()
                            .filter(|s| !options.skips(*s))
                            .collect();
                        break;
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ApiRegistryBuilder;
    use std::fs;
    use tempfile::TempDir;

    const ENTRY: &str = "\
/// <reference path=\"./src/math/calculation.d.ts\" />
import p5 = require('./index');
declare class p5 {
    constructor(sketch: (p: p5) => void);
}
";

    const CALCULATION: &str = "\
import p5 = require('../../index');
declare module '../../index' {
    interface p5InstanceExtensions {
        /**
         *   Adds two numbers.
         *   @param a first operand
         *   @param b second operand
         */
        add(a: number, b: number): number;
    }
}
";

    fn fixture() -> (TempDir, Pipeline) {
        let temp = TempDir::new().unwrap();
        let types = temp.path().join("node_modules/@types/p5");
        fs::create_dir_all(types.join("src/math")).unwrap();
        fs::write(types.join("index.d.ts"), ENTRY).unwrap();
        fs::write(types.join("src/math/calculation.d.ts"), CALCULATION).unwrap();
        fs::write(types.join("global.d.ts"), "declare function setup(): void;\n").unwrap();
        fs::write(types.join("package.json"), r#"{"name": "@types/p5", "version": "1.7.7"}"#)
            .unwrap();

        let mut config = Config::default();
        config.converter.enabled = false;
        let pipeline = Pipeline::with_root(config, temp.path());
        (temp, pipeline)
    }

    fn modules_skipped() -> RunOptions {
        RunOptions {
            skip_modules: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_bundle_and_docs() {
        let (temp, pipeline) = fixture();

        let report = pipeline.run(&modules_skipped());
        assert!(report.is_success(), "failed: {:?}", report.failed);
        assert_eq!(report.completed.len(), 2);
        assert_eq!(report.skipped, vec![Stage::Fetch]);

        let bundled = fs::read_to_string(temp.path().join("assets/types/p5.d.ts")).unwrap();
        assert!(bundled.contains("// Inlined from: ./src/math/calculation.d.ts"));
        assert!(bundled.contains("add(a: number, b: number): number;"));
        assert!(!bundled.contains("declare module '../../index'"));

        let registry = ApiRegistryBuilder::new().build(&bundled);
        let math = registry.get("math").unwrap();
        assert_eq!(math.functions.len(), 1);
        let add = &math.functions[0];
        assert_eq!(add.name, "add");
        let description = add.description.as_deref().unwrap();
        assert!(description.contains("- a: first operand\n- b: second operand"));

        let markdown = fs::read_to_string(temp.path().join("doc/p5.md")).unwrap();
        assert!(markdown.contains("### add\n"));
        assert!(markdown.contains("Version: 1.7.7"));

        let help = fs::read_to_string(temp.path().join("doc/p5-math.txt")).unwrap();
        assert!(help.contains("*p5-add()*"));

        let index = fs::read_to_string(temp.path().join("doc/p5.txt")).unwrap();
        assert!(index.contains("|p5-math.txt|  functions: 1  classes: 0  variables: 0"));
    }

    #[test]
    fn test_missing_entry_aborts_remaining_stages() {
        let (temp, pipeline) = fixture();
        fs::remove_file(temp.path().join("node_modules/@types/p5/index.d.ts")).unwrap();

        let report = pipeline.run(&modules_skipped());

        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, Stage::Bundle);
        assert_eq!(report.aborted, vec![Stage::Docs]);
        assert!(!temp.path().join("doc").exists());
    }

    #[test]
    fn test_docs_without_bundle_fails() {
        let (_temp, pipeline) = fixture();
        let report = pipeline.run(&RunOptions {
            skip_types: true,
            skip_modules: true,
            skip_docs: false,
        });
        assert!(matches!(
            report.failed.as_slice(),
            [(Stage::Docs, BundleError::BundleMissing { .. })]
        ));
    }

    #[test]
    fn test_stage_local_failure_does_not_abort() {
        let (_temp, pipeline) = fixture();
        let mut config = pipeline.config().clone();
        config.fetch.repository = "file:///dtsbundle/no/such/repository".to_string();
        let pipeline = Pipeline::with_root(config, pipeline.root());

        let report = pipeline.run(&RunOptions::default());

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, Stage::Fetch);
        assert!(report.aborted.is_empty());
        assert_eq!(report.completed.len(), 2);
    }
}
