use indexmap::IndexMap;

use crate::config::DocsConfig;

/// Module name to index icon, with a fallback for unmapped names
#[derive(Debug, Clone)]
pub struct IconTable {
    icons: IndexMap<String, String>,
    default_icon: String,
}

impl IconTable {
    pub fn new(default_icon: impl Into<String>) -> Self {
        Self {
            icons: IndexMap::new(),
            default_icon: default_icon.into(),
        }
    }

    pub fn from_config(docs: &DocsConfig) -> Self {
        Self {
            icons: docs.icons.clone(),
            default_icon: docs.default_icon.clone(),
        }
    }

    pub fn with_icon(mut self, module: &str, icon: &str) -> Self {
        self.icons.insert(module.to_string(), icon.to_string());
        self
    }

    pub fn icon(&self, module: &str) -> &str {
        self.icons
            .get(module)
            .map_or(self.default_icon.as_str(), String::as_str)
    }
}

impl Default for IconTable {
    fn default() -> Self {
        Self::from_config(&DocsConfig::default())
    }
}
