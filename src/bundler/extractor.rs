//! Module content extraction.
//!
//! Turns an inlined declaration file into text that can be spliced into a
//! larger document: ambient module wrappers are unwrapped, and import/export
//! statements that would clash at the top level are neutralized.
//!
//! Matching is purely textual. A module body ends at the first line that
//! starts with `}`, so irregular nesting can truncate the extracted body.

use regex::Regex;
use std::sync::LazyLock;

use super::directive::REFERENCE_RE;
use crate::constants::markers;

static AMBIENT_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)declare module\s+['"][^'"]*['"]\s*\{(.*?)\n\}"#).expect("module pattern")
});

static REQUIRE_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+[\w$]+\s*=\s*require\(\s*["'][^"']*["']\s*\);?"#)
        .expect("require import pattern")
});

static ES_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(?:type\s+)?[^;\n=]*?\s+from\s+['"][^'"]*['"];?"#)
        .expect("es import pattern")
});

static EXPORT_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s*\{[^}]*\}").expect("export list pattern"));

static EXPORT_DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\s+[^;]*;").expect("export default pattern"));

static EXPORT_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"export\s+\*\s+from\s+['"][^'"]*['"];?"#).expect("export from pattern")
});

pub struct ModuleContentExtractor;

impl ModuleContentExtractor {
    /// Unwrap every `declare module '…' { … }` body, in order, then neutralize
    /// imports, exports and leftover reference directives.
    ///
    /// Text without an ambient module block is cleaned as a whole.
    pub fn extract(text: &str) -> String {
        let mut bodies = String::new();
        for caps in AMBIENT_MODULE_RE.captures_iter(text) {
            if let Some(body) = caps.get(1) {
                bodies.push_str(body.as_str());
                bodies.push('\n');
            }
        }

        if bodies.is_empty() {
            Self::neutralize(text)
        } else {
            Self::neutralize(&bodies)
        }
    }

    /// Replace import/export statements and reference directives with inert comments
    pub fn neutralize(text: &str) -> String {
        let text = REQUIRE_IMPORT_RE.replace_all(text, "");
        let text = ES_IMPORT_RE.replace_all(&text, markers::IMPORT_REMOVED);
        Self::neutralize_exports(&text)
    }

    /// Export and reference rewriting shared with the document composer
    pub(crate) fn neutralize_exports(text: &str) -> String {
        let text = EXPORT_LIST_RE.replace_all(text, markers::EXPORT_REMOVED);
        let text = EXPORT_DEFAULT_RE.replace_all(&text, markers::DEFAULT_EXPORT_REMOVED);
        let text = EXPORT_FROM_RE.replace_all(&text, markers::EXPORT_FROM_REMOVED);
        REFERENCE_RE
            .replace_all(&text, markers::REFERENCE_REMOVED)
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_module_bodies_in_order() {
        let text = r#"import p5 = require("../../index");
declare module '../../index' {
    interface p5InstanceExtensions {
        abs(n: number): number;
    }
}
declare module "other" {
    const PI: number;
}
"#;
        let out = ModuleContentExtractor::extract(text);
        assert!(!out.contains("declare module"));
        assert!(!out.contains("require("));
        let abs = out.find("abs(n: number)").unwrap();
        let pi = out.find("const PI").unwrap();
        assert!(abs < pi);
    }

    #[test]
    fn test_without_module_block_cleans_whole_text() {
        let text = r#"/// <reference path="./other.d.ts" />
import p5 = require("../index");
export { Foo };
export default p5;
export * from './shapes';
declare function noise(x: number): number;
"#;
        let out = ModuleContentExtractor::extract(text);
        assert!(out.contains(markers::REFERENCE_REMOVED));
        assert!(out.contains(markers::EXPORT_REMOVED));
        assert!(out.contains(markers::DEFAULT_EXPORT_REMOVED));
        assert!(out.contains(markers::EXPORT_FROM_REMOVED));
        assert!(!out.contains("require("));
        assert!(out.contains("declare function noise(x: number): number;"));
    }

    #[test]
    fn test_es_imports_become_comments() {
        let out = ModuleContentExtractor::neutralize("import { Color } from './color';\nlet a: Color;");
        assert!(out.starts_with(markers::IMPORT_REMOVED));
        assert!(out.contains("let a: Color;"));
    }

    #[test]
    fn test_irregular_nesting_truncates_body() {
        // The closing brace of the inner interface sits at column 0.
        let text = "declare module 'x' {\ninterface A {\n  a: number;\n}\n  const b: string;\n}\n";
        let out = ModuleContentExtractor::extract(text);
        assert!(out.contains("a: number;"));
        assert!(!out.contains("const b"));
    }
}
