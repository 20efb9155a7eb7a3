//! Documentation block cleaning.
//!
//! Comment delimiters and leading `*` markers are stripped, `@param` and
//! `@returns` tags become bullets, every other tag passes through as written.

use regex::Regex;
use std::sync::LazyLock;

static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@param\s+(?:\{[^}]*\}\s*)?(\[?[\w$.]+\]?)\s*(?:-\s*)?(.*)$").expect("param tag")
});

static RETURNS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@returns?\b\s*(?:\{[^}]*\}\s*)?(.*)$").expect("returns tag")
});

/// Clean the inside of a `/** … */` block.
///
/// Accepts the text with or without its delimiters. Returns `None` when
/// nothing remains.
pub fn clean(raw: &str) -> Option<String> {
    let inner = raw.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let lines: Vec<String> = inner.lines().map(clean_line).collect();
    let text = lines.join("\n");
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn clean_line(line: &str) -> String {
    let line = line.trim_start();
    let line = line.strip_prefix('*').unwrap_or(line);
    let line = line.strip_prefix(' ').unwrap_or(line).trim_end();
    let tag = line.trim_start();

    if let Some(caps) = PARAM_RE.captures(tag) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        return format!("- {}: {}", name, text).trim_end().to_string();
    }

    if let Some(caps) = RETURNS_RE.captures(tag) {
        let text = caps.get(1).map_or("", |m| m.as_str()).trim();
        return format!("- Returns: {}", text).trim_end().to_string();
    }

    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_delimiters_and_markers() {
        let raw = "/**\n *   Calculates the absolute value.\n *\n *   Always positive.\n */";
        assert_eq!(
            clean(raw).unwrap(),
            "Calculates the absolute value.\n\n  Always positive."
        );
    }

    #[test]
    fn test_param_and_returns_become_bullets() {
        let raw = "\n * Adds two numbers.\n\
                   \x20* @param a first operand\n\
                   \x20* @param {number} b - second operand\n\
                   \x20* @returns the sum\n ";
        assert_eq!(
            clean(raw).unwrap(),
            "Adds two numbers.\n- a: first operand\n- b: second operand\n- Returns: the sum"
        );
    }

    #[test]
    fn test_other_tags_pass_through() {
        let raw = "/** Draws a point.\n * @example point(30, 20);\n * @chainable */";
        assert_eq!(
            clean(raw).unwrap(),
            "Draws a point.\n@example point(30, 20);\n@chainable"
        );
    }

    #[test]
    fn test_optional_param_name_is_kept() {
        let raw = " * @param [fps] number of frames per second";
        assert_eq!(clean(raw).unwrap(), "- [fps]: number of frames per second");
    }

    #[test]
    fn test_empty_block_yields_none() {
        assert!(clean("/** */").is_none());
        assert!(clean("\n *\n ").is_none());
    }

    #[test]
    fn test_indented_tags_become_bullets() {
        let raw = "\n *   Adds two numbers.\n *   @param a first operand\n *   @returns the sum\n ";
        assert_eq!(
            clean(raw).unwrap(),
            "Adds two numbers.\n- a: first operand\n- Returns: the sum"
        );
    }

    #[test]
    fn test_leading_emphasis_survives() {
        let raw = "/**\n * **Note** only one marker is removed.\n */";
        assert_eq!(clean(raw).unwrap(), "**Note** only one marker is removed.");
    }

    #[test]
    fn test_return_alias() {
        assert_eq!(clean(" @return nothing").unwrap(), "- Returns: nothing");
    }
}
