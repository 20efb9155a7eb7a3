//! Bundled document composition.
//!
//! Layout of the output, in order:
//! 1. generator header
//! 2. shared literal-union aliases
//! 3. resolved namespace-style entry content
//! 4. resolved global-scope content
//! 5. dual export footer
//!
//! Sections are concatenated as-is. Names declared in both the entry and the
//! global section are reported through [`ComposedDocument::overlapping`] but
//! left in the text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::extractor::ModuleContentExtractor;
use crate::constants::{bundle, markers};

static SELF_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+[\w$]+\s*=\s*require\(\s*["']\./index["']\s*\);?"#)
        .expect("self import pattern")
});

static RELATIVE_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+[\w$]+\s*=\s*require\(\s*["']\./[^"']*["']\s*\);?"#)
        .expect("relative import pattern")
});

static MODULE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"declare module\s+['"][^'"]*['"]"#).expect("module header pattern")
});

static DECLARED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+)?(?:declare\s+)?(?:function|class|interface|type|enum|const|let|var)\s+([A-Za-z_$][\w$]*)",
    )
    .expect("declared name pattern")
});

/// The bundled document and its composition diagnostics
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub text: String,
    /// Top-level names declared in both the entry and the global section
    pub overlapping: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DocumentComposer {
    namespace: String,
    title: String,
    source_label: String,
    generated_at: String,
}

impl DocumentComposer {
    pub fn new(namespace: &str, title: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            title: title.to_string(),
            source_label: String::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_source_label(mut self, label: &str) -> Self {
        self.source_label = label.to_string();
        self
    }

    /// Fix the header timestamp (reproducible output)
    pub fn with_timestamp(mut self, timestamp: &str) -> Self {
        self.generated_at = timestamp.to_string();
        self
    }

    pub fn compose(&self, resolved_entry: &str, resolved_global: &str) -> ComposedDocument {
        let entry = Self::clean_top_level(resolved_entry);
        let global = Self::clean_top_level(resolved_global);
        let overlapping = Self::overlapping_names(&entry, &global);

        let mut out = String::with_capacity(entry.len() + global.len() + 2048);
        out.push_str(&format!("// Generated {} Type Definitions\n", self.title));
        out.push_str("// This file provides both global and namespace support\n");
        out.push_str(&format!("// Generated: {}\n", self.generated_at));
        if !self.source_label.is_empty() {
            out.push_str(&format!("// Original source: {}\n", self.source_label));
        }
        out.push('\n');

        out.push_str(&Self::banner(&[
            "BASIC TYPE DEFINITIONS",
            "Ensure all fundamental types are available globally",
        ]));
        out.push_str(bundle::PREAMBLE);
        out.push('\n');

        let heading = format!("{} NAMESPACE SUPPORT", self.namespace.to_uppercase());
        let usage = format!(
            "Use: import {ns} from '{ns}'; const instance = new {ns}();",
            ns = self.namespace
        );
        out.push_str(&Self::banner(&[heading.as_str(), usage.as_str()]));
        out.push_str(&entry);
        out.push_str("\n\n");

        out.push_str(&Self::banner(&[
            "GLOBAL SUPPORT",
            "Use: members are directly available in global scope",
        ]));
        out.push_str(&global);
        out.push_str("\n\n");

        out.push_str(&Self::banner(&[
            "DUAL EXPORT SUPPORT",
            "Supports both import styles",
        ]));
        out.push_str(&format!("export as namespace {};\n", self.namespace));
        out.push_str(&format!("export = {};\n", self.namespace));

        ComposedDocument {
            text: out,
            overlapping,
        }
    }

    /// Neutralize top-level module syntax of an already resolved root file
    fn clean_top_level(text: &str) -> String {
        let text = SELF_IMPORT_RE.replace_all(text, "");
        let text = RELATIVE_IMPORT_RE.replace_all(&text, markers::IMPORT_REMOVED);
        let text = MODULE_HEADER_RE.replace_all(&text, markers::MODULE_DECLARATION_REMOVED);
        ModuleContentExtractor::neutralize_exports(&text)
    }

    fn banner(lines: &[&str]) -> String {
        let rule = format!("// {}\n", "=".repeat(bundle::BANNER_WIDTH));
        let mut out = rule.clone();
        for line in lines {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&rule);
        out
    }

    fn overlapping_names(entry: &str, global: &str) -> Vec<String> {
        let declared: HashSet<&str> = DECLARED_NAME_RE
            .captures_iter(entry)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        let mut seen = HashSet::new();
        DECLARED_NAME_RE
            .captures_iter(global)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .filter(|name| declared.contains(name) && seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> DocumentComposer {
        DocumentComposer::new("p5", "p5.js")
            .with_source_label("@types/p5 package")
            .with_timestamp("2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_sections_keep_fixed_order() {
        let doc = composer().compose("declare class p5 {}", "declare function setup(): void;");
        let text = &doc.text;

        let preamble = text.find("type ANGLE_MODE = RADIANS | DEGREES;").unwrap();
        let entry = text.find("declare class p5 {}").unwrap();
        let global = text.find("declare function setup(): void;").unwrap();
        let footer = text.find("export as namespace p5;").unwrap();

        assert!(preamble < entry && entry < global && global < footer);
        assert!(text.trim_end().ends_with("export = p5;"));
        assert!(text.contains("// Generated: 2024-01-01T00:00:00Z"));
        assert!(text.contains("// Original source: @types/p5 package"));
    }

    #[test]
    fn test_top_level_module_syntax_is_neutralized() {
        let entry = "import p5 = require(\"./index\");\n\
                     import other = require(\"./lib/other\");\n\
                     declare module 'p5' {\n}\n\
                     export { Color };\n";
        let doc = composer().compose(entry, "");

        assert!(!doc.text.contains("require(\"./index\")"));
        assert!(doc.text.contains(markers::IMPORT_REMOVED));
        assert!(doc.text.contains(markers::MODULE_DECLARATION_REMOVED));
        assert!(doc.text.contains(markers::EXPORT_REMOVED));
    }

    #[test]
    fn test_overlapping_names_are_reported_not_removed() {
        let entry = "declare function random(): number;\ndeclare const PI: number;\n";
        let global = "declare function random(): number;\n\
                      declare function random(max: number): number;\n";
        let doc = composer().compose(entry, global);

        assert_eq!(doc.overlapping, vec!["random"]);
        assert_eq!(doc.text.matches("declare function random(): number;").count(), 2);
    }

    #[test]
    fn test_namespace_drives_footer() {
        let doc = DocumentComposer::new("tone", "Tone.js").compose("", "");
        assert!(doc.text.contains("export as namespace tone;"));
        assert!(doc.text.contains("// TONE NAMESPACE SUPPORT"));
        assert!(!doc.text.contains("// Original source:"));
    }
}
