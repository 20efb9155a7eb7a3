//! Markdown rendering of the registry.
//!
//! Table of contents grouped by kind, then one section per kind with every
//! element in registry order. Kinds without elements produce no section.

use crate::types::{ApiElement, ModuleRecord, ModuleRegistry, Section};

use super::RenderContext;

/// Combined reference page for the whole registry
pub fn render_registry(registry: &ModuleRegistry, ctx: &RenderContext) -> String {
    let modules: Vec<&ModuleRecord> = registry.modules().collect();
    let mut md = header(&format!("{} API Reference", ctx.title), ctx);
    md.push_str(&render_modules(&modules));
    md.push_str(&footer(ctx));
    md
}

/// Reference page restricted to one module
pub fn render_module(record: &ModuleRecord, ctx: &RenderContext) -> String {
    let title = format!("{} {}", ctx.title, super::title_case(&record.name));
    let mut md = header(&title, ctx);
    md.push_str(&render_modules(&[record]));
    md.push_str(&footer(ctx));
    md
}

fn header(title: &str, ctx: &RenderContext) -> String {
    format!(
        "# {}\n\nVersion: {}\nGenerated: {}\n\n",
        title, ctx.version, ctx.generated_at
    )
}

fn footer(ctx: &RenderContext) -> String {
    format!(
        "*This documentation was generated from the {} type definitions.*\n",
        ctx.title
    )
}

fn render_modules(modules: &[&ModuleRecord]) -> String {
    let sections: Vec<(Section, Vec<&ApiElement>)> = Section::ALL
        .iter()
        .map(|&section| {
            let elements: Vec<&ApiElement> =
                modules.iter().flat_map(|m| m.section(section)).collect();
            (section, elements)
        })
        .filter(|(_, elements)| !elements.is_empty())
        .collect();

    if sections.is_empty() {
        return "No documented API found.\n\n".to_string();
    }

    let mut md = String::from("## Table of Contents\n\n");
    for (section, elements) in &sections {
        md.push_str(&format!("**{}**\n\n", section.title()));
        for element in elements {
            md.push_str(&format!("- [{}](#{})\n", element.name, element.anchor()));
        }
        md.push('\n');
    }
    md.push_str("---\n\n");

    for (section, elements) in &sections {
        md.push_str(&format!("## {}\n\n", section.title()));
        for element in elements {
            md.push_str(&render_element(element));
        }
        md.push_str("---\n\n");
    }

    md
}

fn render_element(element: &ApiElement) -> String {
    let mut md = format!("### {}\n\n", element.name);

    if let Some(desc) = &element.description {
        md.push_str(desc);
        md.push_str("\n\n");
    }

    if let Some(line) = attribution(element) {
        md.push_str(&format!("_Defined in {}_\n\n", line));
    }

    md
}

/// `module/subModule` when the element carries an origin
pub(crate) fn attribution(element: &ApiElement) -> Option<String> {
    match (&element.origin_module, &element.origin_sub_module) {
        (Some(module), Some(sub)) => Some(format!("{}/{}", module, sub)),
        (None, Some(sub)) => Some(sub.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiKind;

    fn ctx() -> RenderContext {
        RenderContext::new("p5", "p5.js", "1.7.0").with_timestamp("2024-01-01T00:00:00Z")
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        let math = registry.entry("math");
        math.push(
            ApiElement::new("loadImage", ApiKind::Function)
                .with_description(Some("Loads an image.".to_string()))
                .with_origin(Some("math"), Some("calculation")),
        );
        math.push(ApiElement::new("abs", ApiKind::Function));
        registry
            .entry("core")
            .push(ApiElement::new("Vector", ApiKind::Class));
        registry
    }

    #[test]
    fn test_toc_links_use_lowercase_anchor() {
        let md = render_registry(&registry(), &ctx());
        assert!(md.starts_with("# p5.js API Reference\n"));
        assert!(md.contains("- [loadImage](#loadimage)"));
        assert!(md.contains("Version: 1.7.0"));
    }

    #[test]
    fn test_sections_follow_registry_order() {
        let md = render_registry(&registry(), &ctx());
        let functions = md.find("## Functions").unwrap();
        let load = md.find("### loadImage\n").unwrap();
        let abs = md.find("### abs\n").unwrap();
        let classes = md.find("## Classes").unwrap();
        assert!(functions < load && load < abs && abs < classes);
        assert!(!md.contains("## Variables"));
    }

    #[test]
    fn test_element_body() {
        let md = render_registry(&registry(), &ctx());
        assert!(md.contains("### loadImage\n\nLoads an image.\n\n_Defined in math/calculation_\n"));
        assert!(md.contains("### abs\n\n---\n\n## Classes"));
    }

    #[test]
    fn test_module_page_only_shows_that_module() {
        let registry = registry();
        let md = render_module(registry.get("core").unwrap(), &ctx());
        assert!(md.starts_with("# p5.js Core\n"));
        assert!(md.contains("## Classes"));
        assert!(!md.contains("## Functions"));
        assert!(!md.contains("loadImage"));
    }

    #[test]
    fn test_empty_registry_renders() {
        let md = render_registry(&ModuleRegistry::new(), &ctx());
        assert!(md.contains("No documented API found."));
    }
}
