//! Module-asset fetch stage.
//!
//! Picks the newest release tag of the configured repository, clones it
//! shallowly into a temporary directory and copies the configured library
//! files into the libs directory. Every git problem is a `BundleError::Fetch`,
//! which only fails this stage.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::{Config, FetchFile};
use crate::constants::fetch::VERSION_FILE;
use crate::types::{ArtifactKind, BundleError, OutputArtifact, Result};

#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub tag: String,
    pub copied: Vec<PathBuf>,
    /// Configured sources absent from the release
    pub missing: Vec<PathBuf>,
}

pub fn run(config: &Config, root: &Path) -> Result<FetchSummary> {
    let repository = &config.fetch.repository;
    let libs_dir = root.join(&config.paths.libs_dir);

    let listing = git(&["ls-remote", "--tags", repository])?;
    let tags = parse_tags(&listing);
    debug!("{} tags found in {}", tags.len(), repository);
    let tag = latest(&tags)
        .ok_or_else(|| BundleError::Fetch(format!("No release tags found in {}", repository)))?
        .to_string();
    info!("Using release {}", tag);

    let checkout = TempDir::new()
        .map_err(|e| BundleError::Fetch(format!("Failed to create temp directory: {}", e)))?;
    let target = checkout.path().to_string_lossy().to_string();
    git(&[
        "clone", "--depth", "1", "--branch", &tag, repository, &target,
    ])?;

    let (copied, missing) = install(&config.fetch.files, checkout.path(), &libs_dir)?;

    OutputArtifact::new(
        ArtifactKind::Library,
        libs_dir.join(VERSION_FILE),
        format!("{}\n", tag),
    )
    .write()?;

    Ok(FetchSummary {
        tag,
        copied,
        missing,
    })
}

/// Copy each configured file out of a checkout; absent sources are skipped
pub(crate) fn install(
    files: &[FetchFile],
    checkout: &Path,
    libs_dir: &Path,
) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    fs::create_dir_all(libs_dir).map_err(|e| BundleError::write(libs_dir, e))?;

    let mut copied = Vec::new();
    let mut missing = Vec::new();
    for file in files {
        let source = checkout.join(&file.source);
        if !source.is_file() {
            warn!("{} not found in release, skipping", file.source.display());
            missing.push(file.source.clone());
            continue;
        }
        let dest = libs_dir.join(&file.dest);
        fs::copy(&source, &dest).map_err(|e| BundleError::write(&dest, e))?;
        debug!("Copied {} -> {}", file.source.display(), dest.display());
        copied.push(dest);
    }
    Ok((copied, missing))
}

fn git(args: &[&str]) -> Result<String> {
    debug!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|e| BundleError::Fetch(format!("Failed to run git: {}. Is it installed?", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BundleError::Fetch(format!(
            "git {} exited with {}: {}",
            args.first().unwrap_or(&""),
            output.status,
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Tag names from `git ls-remote --tags` output, peeled `^{}` entries dropped
pub fn parse_tags(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .filter_map(|r| r.trim().strip_prefix("refs/tags/"))
        .filter(|tag| !tag.ends_with("^{}"))
        .map(str::to_string)
        .collect()
}

/// Highest tag in version order
pub fn latest(tags: &[String]) -> Option<&str> {
    tags.iter()
        .max_by(|a, b| compare_versions(a, b))
        .map(String::as_str)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    Text(&'a str),
    Number(u64),
}

fn segments(tag: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = tag.as_bytes();
    while start < bytes.len() {
        let digit = bytes[start].is_ascii_digit();
        let end = bytes[start..]
            .iter()
            .position(|b| b.is_ascii_digit() != digit)
            .map_or(bytes.len(), |p| start + p);
        let part = &tag[start..end];
        out.push(match part.parse::<u64>() {
            Ok(n) if digit => Segment::Number(n),
            _ => Segment::Text(part),
        });
        start = end;
    }
    out
}

/// Natural ordering: digit runs compare numerically, everything else bytewise
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    segments(a).cmp(&segments(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_skips_peeled_refs() {
        let listing = "\
a1\trefs/tags/v1.9.0
a2\trefs/tags/v1.9.0^{}
a3\trefs/tags/v1.10.0
garbage line
";
        assert_eq!(parse_tags(listing), vec!["v1.9.0", "v1.10.0"]);
    }

    #[test]
    fn test_latest_uses_numeric_order() {
        let tags: Vec<String> = ["v1.9.4", "v1.11.1", "v1.2.0", "v1.11.0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(latest(&tags), Some("v1.11.1"));
        assert_eq!(latest(&[]), None);
    }

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("v2.0.0", "v2.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("v2.0.0", "v2.0.0-rc.1"), Ordering::Less);
    }

    #[test]
    fn test_install_copies_present_files_and_reports_missing() {
        let checkout = TempDir::new().unwrap();
        let libs = TempDir::new().unwrap();
        fs::create_dir_all(checkout.path().join("src")).unwrap();
        fs::write(checkout.path().join("src/app.js"), "// p5").unwrap();

        let files = vec![
            FetchFile {
                source: PathBuf::from("src/app.js"),
                dest: "p5.js".to_string(),
            },
            FetchFile {
                source: PathBuf::from("lib/addons/p5.sound.js"),
                dest: "p5.sound.js".to_string(),
            },
        ];
        let target = libs.path().join("assets/libs");
        let (copied, missing) = install(&files, checkout.path(), &target).unwrap();

        assert_eq!(copied, vec![target.join("p5.js")]);
        assert_eq!(missing, vec![PathBuf::from("lib/addons/p5.sound.js")]);
        assert_eq!(fs::read_to_string(target.join("p5.js")).unwrap(), "// p5");
    }
}
