use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of documented declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    Function,
    Class,
    Interface,
    Variable,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::Function => "function",
            ApiKind::Class => "class",
            ApiKind::Interface => "interface",
            ApiKind::Variable => "variable",
        }
    }

    /// Registry bucket the kind is stored under
    pub fn section(&self) -> Section {
        match self {
            ApiKind::Function => Section::Functions,
            ApiKind::Class | ApiKind::Interface => Section::Classes,
            ApiKind::Variable => Section::Variables,
        }
    }
}

impl std::fmt::Display for ApiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind bucket of a module record, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Functions,
    Classes,
    Variables,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Functions, Section::Classes, Section::Variables];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Functions => "Functions",
            Section::Classes => "Classes",
            Section::Variables => "Variables",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Functions => "functions",
            Section::Classes => "classes",
            Section::Variables => "variables",
        }
    }
}

/// A documented declaration mined from the bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiElement {
    pub name: String,
    pub kind: ApiKind,
    /// Cleaned documentation text, `None` when the block was empty
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_sub_module: Option<String>,
}

impl ApiElement {
    pub fn new(name: impl Into<String>, kind: ApiKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            origin_module: None,
            origin_sub_module: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn with_origin(mut self, module: Option<&str>, sub_module: Option<&str>) -> Self {
        self.origin_module = module.map(str::to_string);
        self.origin_sub_module = sub_module.map(str::to_string);
        self
    }

    /// Lower-cased name used as a Markdown anchor
    pub fn anchor(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Documented surface of one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub name: String,
    pub functions: Vec<ApiElement>,
    pub classes: Vec<ApiElement>,
    pub variables: Vec<ApiElement>,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn section(&self, section: Section) -> &[ApiElement] {
        match section {
            Section::Functions => &self.functions,
            Section::Classes => &self.classes,
            Section::Variables => &self.variables,
        }
    }

    /// Append an element unless one with the same name already sits in its bucket.
    ///
    /// Returns `false` for a duplicate (overloads keep their first documentation).
    pub(crate) fn push(&mut self, element: ApiElement) -> bool {
        let bucket = match element.kind.section() {
            Section::Functions => &mut self.functions,
            Section::Classes => &mut self.classes,
            Section::Variables => &mut self.variables,
        };
        if bucket.iter().any(|e| e.name == element.name) {
            return false;
        }
        bucket.push(element);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.variables.is_empty()
    }

    pub fn element_count(&self) -> usize {
        self.functions.len() + self.classes.len() + self.variables.len()
    }
}

/// Ordered mapping of module name to its record.
///
/// Produced once by the registry builder and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRegistry {
    modules: IndexMap<String, ModuleRecord>,
}

impl ModuleRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record for `name`, created at the end of the ordering if absent
    pub(crate) fn entry(&mut self, name: &str) -> &mut ModuleRecord {
        self.modules
            .entry(name.to_string())
            .or_insert_with(|| ModuleRecord::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn element_count(&self) -> usize {
        self.modules.values().map(ModuleRecord::element_count).sum()
    }
}
