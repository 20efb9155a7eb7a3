//! Multi-format documentation rendering.
//!
//! Every renderer is a pure function of the registry and a [`RenderContext`]
//! (page prefix, title, version, timestamp). Nothing here touches the
//! filesystem; [`MultiFormatRenderer::render`] only describes the artifacts.

pub mod helpdoc;
pub mod icons;
pub mod index;
pub mod markdown;

use std::path::Path;

pub use icons::IconTable;

use crate::types::{ArtifactKind, ModuleRecord, ModuleRegistry, OutputArtifact};

/// Naming and stamping shared by every page
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Page prefix and namespace, e.g. `p5`
    pub name: String,
    pub title: String,
    pub version: String,
    pub generated_at: String,
}

impl RenderContext {
    pub fn new(name: &str, title: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            version: version.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: &str) -> Self {
        self.generated_at = timestamp.to_string();
        self
    }

    pub fn markdown_file_name(&self) -> String {
        format!("{}.md", self.name)
    }

    pub fn help_file_name(&self, module: &str) -> String {
        format!("{}-{}.txt", self.name, module)
    }

    pub fn index_file_name(&self) -> String {
        format!("{}.txt", self.name)
    }
}

/// `2d_primitives` -> `2d Primitives`
pub fn title_case(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct MultiFormatRenderer {
    context: RenderContext,
    icons: IconTable,
}

impl MultiFormatRenderer {
    pub fn new(context: RenderContext, icons: IconTable) -> Self {
        Self { context, icons }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn markdown(&self, registry: &ModuleRegistry) -> String {
        markdown::render_registry(registry, &self.context)
    }

    /// Markdown for one module, fed to an external help converter
    pub fn module_markdown(&self, record: &ModuleRecord) -> String {
        markdown::render_module(record, &self.context)
    }

    pub fn help_page(&self, record: &ModuleRecord) -> String {
        helpdoc::render_module(record, &self.context)
    }

    pub fn index(&self, registry: &ModuleRegistry) -> String {
        index::render(registry, &self.context, &self.icons)
    }

    /// Every page of the registry, destined for `docs_dir`.
    ///
    /// Order: combined Markdown, one help page per module in registry order,
    /// then the index.
    pub fn render(&self, registry: &ModuleRegistry, docs_dir: &Path) -> Vec<OutputArtifact> {
        let mut artifacts = Vec::with_capacity(registry.len() + 2);

        artifacts.push(OutputArtifact::new(
            ArtifactKind::Markdown,
            docs_dir.join(self.context.markdown_file_name()),
            self.markdown(registry),
        ));

        for record in registry.modules() {
            artifacts.push(OutputArtifact::new(
                ArtifactKind::HelpPage {
                    module: record.name.clone(),
                },
                docs_dir.join(self.context.help_file_name(&record.name)),
                self.help_page(record),
            ));
        }

        artifacts.push(OutputArtifact::new(
            ArtifactKind::Index,
            docs_dir.join(self.context.index_file_name()),
            self.index(registry),
        ));

        artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiElement, ApiKind};

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("math"), "Math");
        assert_eq!(title_case("2d_primitives"), "2d Primitives");
        assert_eq!(title_case("web-gl"), "Web Gl");
    }

    #[test]
    fn test_render_lists_every_page() {
        let mut registry = ModuleRegistry::new();
        registry
            .entry("math")
            .push(ApiElement::new("abs", ApiKind::Function));
        registry.entry("color");

        let renderer = MultiFormatRenderer::new(
            RenderContext::new("p5", "p5.js", "1.7.0"),
            IconTable::default(),
        );
        let artifacts = renderer.render(&registry, Path::new("doc"));

        let names: Vec<_> = artifacts.iter().filter_map(|a| a.file_name()).collect();
        assert_eq!(names, vec!["p5.md", "p5-math.txt", "p5-color.txt", "p5.txt"]);
        assert_eq!(artifacts[0].kind, ArtifactKind::Markdown);
        assert_eq!(artifacts[3].kind, ArtifactKind::Index);
    }
}
