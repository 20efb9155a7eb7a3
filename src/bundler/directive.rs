//! Reference directive scanning.
//!
//! A reference directive is a triple-slash comment naming another
//! declaration file: `/// <reference path="./src/math/calculation.d.ts" />`.

use regex::Regex;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use crate::types::Result;

pub(crate) static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"///\s*<reference\s+path="([^"]+)"\s*/>"#).expect("reference pattern")
});

/// One directive occurrence inside a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Path exactly as written in the directive
    pub literal_path: String,
    /// Lexically normalized absolute-or-base-relative target
    pub resolved_path: PathBuf,
    /// Byte range of the whole directive text
    pub span: Range<usize>,
}

/// A declaration file with its directives, in order of appearance
#[derive(Debug, Clone)]
pub struct DeclarationFile {
    pub path: PathBuf,
    pub raw_text: String,
    pub directives: Vec<Directive>,
}

impl DeclarationFile {
    pub fn read(path: &Path) -> Result<Self> {
        let raw_text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(path, raw_text))
    }

    pub fn from_text(path: &Path, raw_text: String) -> Self {
        let directives = scan(&raw_text, &base_dir(path));
        Self {
            path: path.to_path_buf(),
            raw_text,
            directives,
        }
    }

    /// Directory that relative directives in this file resolve against
    pub fn base_dir(&self) -> PathBuf {
        base_dir(&self.path)
    }
}

/// Find every reference directive in `content`, in order of first appearance
pub fn scan(content: &str, base: &Path) -> Vec<Directive> {
    REFERENCE_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let literal = caps.get(1)?.as_str();
            Some(Directive {
                literal_path: literal.to_string(),
                resolved_path: normalize(&base.join(literal)),
                span: whole.range(),
            })
        })
        .collect()
}

/// Whether any directive syntax remains in `content`
pub fn contains_directive(content: &str) -> bool {
    REFERENCE_RE.is_match(content)
}

fn base_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
///
/// Targets that do not exist still get a stable key this way.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_keeps_appearance_order() {
        let text = r#"/// <reference path="./src/b.d.ts" />
/// <reference  path="./src/a.d.ts"/>
declare const x: number;
"#;
        let found = scan(text, Path::new("types"));
        let literals: Vec<_> = found.iter().map(|d| d.literal_path.as_str()).collect();
        assert_eq!(literals, vec!["./src/b.d.ts", "./src/a.d.ts"]);
        assert_eq!(found[0].resolved_path, PathBuf::from("types/src/b.d.ts"));
        assert_eq!(
            &text[found[1].span.clone()],
            r#"/// <reference  path="./src/a.d.ts"/>"#
        );
    }

    #[test]
    fn test_normalize_folds_parent_dirs() {
        assert_eq!(
            normalize(Path::new("a/b/../c/./d.ts")),
            PathBuf::from("a/c/d.ts")
        );
        assert_eq!(normalize(Path::new("./x/../../y.ts")), PathBuf::from("../y.ts"));
        assert_eq!(normalize(Path::new("/root/../etc")), PathBuf::from("/etc"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_declaration_file_base_dir() {
        let file = DeclarationFile::from_text(
            Path::new("pkg/index.d.ts"),
            r#"/// <reference path="./lib/x.d.ts" />"#.to_string(),
        );
        assert_eq!(file.base_dir(), PathBuf::from("pkg"));
        assert_eq!(
            file.directives[0].resolved_path,
            PathBuf::from("pkg/lib/x.d.ts")
        );
    }

    #[test]
    fn test_contains_directive() {
        assert!(contains_directive(r#"/// <reference path="a.d.ts" />"#));
        assert!(!contains_directive("// Inlined from: a.d.ts"));
    }
}
