//! Run Command
//!
//! Usage:
//!   dtsbundle run [--skip-types] [--skip-modules] [--skip-docs]
//!   dtsbundle bundle | fetch | docs

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::pipeline::{Pipeline, RunOptions, Stage, StageOutput};
use crate::types::{BundleError, Result};

/// Run every stage not skipped by `options`
pub fn run(config_path: Option<&Path>, options: RunOptions, out: &Output) -> Result<()> {
    let pipeline = Pipeline::new(ConfigLoader::load_with(config_path)?);
    out.header(&format!("Building {} assets", pipeline.config().project.title));

    let report = pipeline.run(&options);

    for stage in &report.skipped {
        out.info(&format!("{} stage skipped", stage));
    }
    for output in &report.completed {
        print_output(output, out);
    }
    for (stage, e) in &report.failed {
        out.error(&format!("{} stage failed: {}", stage, e));
    }
    for stage in &report.aborted {
        out.warning(&format!("{} stage not run", stage));
    }

    if report.is_success() {
        out.success("All stages completed");
        Ok(())
    } else {
        Err(BundleError::Stage {
            stage: "run".to_string(),
            message: format!("{} of the requested stages failed", report.failed.len()),
        })
    }
}

/// Run exactly one stage
pub fn stage(config_path: Option<&Path>, stage: Stage, out: &Output) -> Result<()> {
    let pipeline = Pipeline::new(ConfigLoader::load_with(config_path)?);
    let output = pipeline.run_stage(stage)?;
    print_output(&output, out);
    Ok(())
}

fn print_output(output: &StageOutput, out: &Output) {
    match output {
        StageOutput::Bundle(summary) => {
            out.success(&format!("Bundled declarations: {}", summary.output.display()));
            out.detail("Size", format!("{} bytes, {} lines", summary.bytes, summary.lines));
            out.detail("Inlined", summary.inlined);
            for path in &summary.failed {
                out.warning(&format!("Unresolved reference: {}", path));
            }
            if !summary.overlapping.is_empty() {
                out.warning(&format!(
                    "Declared in both sections: {}",
                    summary.overlapping.join(", ")
                ));
            }
        }
        StageOutput::Fetch(summary) => {
            out.success(&format!("Fetched release {}", summary.tag));
            for path in &summary.copied {
                out.detail("Copied", path.display());
            }
            for path in &summary.missing {
                out.warning(&format!("Not in release: {}", path.display()));
            }
        }
        StageOutput::Docs(summary) => {
            out.success(&format!(
                "Documented {} elements in {} modules (version {})",
                summary.elements, summary.modules, summary.version
            ));
            if summary.converted > 0 {
                out.detail("Converted help pages", summary.converted);
            }
            for path in &summary.written {
                out.detail("Wrote", path.display());
            }
        }
    }
}
