//! Help-dialect rendering.
//!
//! Fixed-width pages for terminal help viewers: `=` banners, right-aligned
//! `*tag*` targets and `|tag|` cross-references. Every page ends with the
//! generator line and the modeline.

use console::measure_text_width;

use super::{RenderContext, markdown::attribution, title_case};
use crate::constants::docs::{HELP_WIDTH, MODELINE};
use crate::types::{ApiElement, ApiKind, ModuleRecord, Section};

/// Help page for one module
pub fn render_module(record: &ModuleRecord, ctx: &RenderContext) -> String {
    let prefix = format!("{}-{}", ctx.name, record.name);
    let mut out = page_header(
        &ctx.help_file_name(&record.name),
        &format!("{} {} module", ctx.title, title_case(&record.name)),
        ctx,
    );

    let sections: Vec<Section> = Section::ALL
        .into_iter()
        .filter(|&s| !record.section(s).is_empty())
        .collect();

    out.push_str(&rule());
    out.push_str(&align("CONTENTS", &format!("*{}-contents*", prefix)));
    out.push_str("\n\n");
    if sections.is_empty() {
        out.push_str("  No documented API.\n");
    }
    for (i, section) in sections.iter().enumerate() {
        out.push_str(&leader(
            &format!("  {}. {}", i + 1, section.title()),
            &format!("|{}-{}|", prefix, section.slug()),
        ));
        out.push('\n');
    }
    out.push('\n');

    for section in sections {
        out.push_str(&rule());
        out.push_str(&align(
            &section.title().to_uppercase(),
            &format!("*{}-{}*", prefix, section.slug()),
        ));
        out.push_str("\n\n");
        for element in record.section(section) {
            out.push_str(&render_element(element, ctx));
        }
    }

    out.push_str(&footer());
    out
}

fn render_element(element: &ApiElement, ctx: &RenderContext) -> String {
    let mut out = align(
        &display_name(element),
        &format!("*{}*", tag(&ctx.name, element)),
    );
    out.push('\n');

    if let Some(desc) = &element.description {
        for line in desc.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    if let Some(origin) = attribution(element) {
        out.push_str(&format!("    Defined in: {}\n", origin));
    }
    out.push('\n');
    out
}

/// Help tag of an element: `<name>-<element>()` for functions
pub fn tag(page_prefix: &str, element: &ApiElement) -> String {
    match element.kind {
        ApiKind::Function => format!("{}-{}()", page_prefix, element.name),
        _ => format!("{}-{}", page_prefix, element.name),
    }
}

fn display_name(element: &ApiElement) -> String {
    match element.kind {
        ApiKind::Function => format!("{}()", element.name),
        _ => element.name.clone(),
    }
}

/// First two lines of a page: file tag and title, then version and timestamp
pub(crate) fn page_header(file_name: &str, title: &str, ctx: &RenderContext) -> String {
    let mut out = align(&format!("*{}*", file_name), title);
    out.push('\n');
    out.push_str(&align(
        "",
        &format!("Version {}  Generated {}", ctx.version, ctx.generated_at),
    ));
    out.push_str("\n\n");
    out
}

pub(crate) fn footer() -> String {
    format!(
        "{}Generated by dtsbundle v{}\n\n{}\n",
        rule(),
        env!("CARGO_PKG_VERSION"),
        MODELINE
    )
}

pub(crate) fn rule() -> String {
    format!("{}\n", "=".repeat(HELP_WIDTH))
}

/// `left` and `right` on one line, `right` flush with the page edge.
///
/// When both do not fit, `right` moves to its own line.
pub(crate) fn align(left: &str, right: &str) -> String {
    let left_width = measure_text_width(left);
    let right_width = measure_text_width(right);

    if left.is_empty() {
        return format!(
            "{}{}",
            " ".repeat(HELP_WIDTH.saturating_sub(right_width)),
            right
        );
    }
    if left_width + 1 + right_width > HELP_WIDTH {
        return format!("{}\n{}", left, align("", right));
    }
    format!(
        "{}{}{}",
        left,
        " ".repeat(HELP_WIDTH - left_width - right_width),
        right
    )
}

/// Contents entry: `left ....... right`
fn leader(left: &str, right: &str) -> String {
    let used = measure_text_width(left) + measure_text_width(right) + 2;
    if used >= HELP_WIDTH {
        return align(left, right);
    }
    format!("{} {} {}", left, ".".repeat(HELP_WIDTH - used), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModuleRegistry;

    fn ctx() -> RenderContext {
        RenderContext::new("p5", "p5.js", "1.7.0").with_timestamp("2024-01-01T00:00:00Z")
    }

    fn math() -> ModuleRecord {
        let mut registry = ModuleRegistry::new();
        let record = registry.entry("math");
        record.push(
            ApiElement::new("add", ApiKind::Function)
                .with_description(Some("Adds.\n\n- a: first".to_string()))
                .with_origin(Some("math"), Some("calculation")),
        );
        record.push(ApiElement::new("PI", ApiKind::Variable));
        record.clone()
    }

    #[test]
    fn test_tags_and_cross_references() {
        let page = render_module(&math(), &ctx());
        assert!(page.starts_with("*p5-math.txt*"));
        assert!(page.contains("*p5-add()*"));
        assert!(page.contains("*p5-PI*"));
        assert!(page.contains("|p5-math-functions|"));
        assert!(page.contains("|p5-math-variables|"));
        assert!(!page.contains("p5-math-classes"));
        assert!(page.contains("    Defined in: math/calculation\n"));
    }

    #[test]
    fn test_lines_fit_page_width() {
        let page = render_module(&math(), &ctx());
        for line in page.lines() {
            assert!(measure_text_width(line) <= HELP_WIDTH, "too wide: {line}");
        }
        let tag_line = page.lines().find(|l| l.ends_with("*p5-add()*")).unwrap();
        assert_eq!(measure_text_width(tag_line), HELP_WIDTH);
        assert!(tag_line.starts_with("add()"));
    }

    #[test]
    fn test_description_blank_lines_stay_blank() {
        let page = render_module(&math(), &ctx());
        assert!(page.contains("    Adds.\n\n    - a: first\n"));
    }

    #[test]
    fn test_footer_ends_with_modeline() {
        let page = render_module(&math(), &ctx());
        assert!(page.contains(&format!(
            "Generated by dtsbundle v{}",
            env!("CARGO_PKG_VERSION")
        )));
        assert!(page.ends_with("vim:tw=78:ts=8:ft=help:norl:\n"));
    }

    #[test]
    fn test_align_wraps_when_too_long() {
        let long = "x".repeat(HELP_WIDTH);
        let out = align(&long, "*tag*");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("*tag*"));
        assert_eq!(lines[1].len(), HELP_WIDTH);
    }
}
