//! Declaration recognizers.
//!
//! Three independent scans over a chunk of declaration text, one per shape:
//! function-like members, class/interface headers and typed properties.
//! Every pattern starts with a documentation block, so a declaration is only
//! recognized when a `/** … */` block sits directly in front of it (only
//! whitespace in between).

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ApiKind;

/// `/** … */` with the inside captured as `doc`
const DOC: &str = r"/\*\*(?P<doc>(?:[^*]|\*+[^*/])*)\*+/\s*";

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{DOC}(?:(?:export|declare|static|public|private|protected|readonly|abstract|async|function)\s+)*(?P<name>[A-Za-z_$][\w$]*)\??\s*(?:<[^<>]*(?:<[^<>]*>[^<>]*)*>)?\s*\((?:[^()]|\([^()]*\))*\)\s*:\s*[^;{{\n]+"
    ))
    .expect("function pattern")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{DOC}(?:(?:export|declare|abstract|default)\s+)*(?P<kind>class|interface)\s+(?P<name>[A-Za-z_$][\w$]*)"
    ))
    .expect("class pattern")
});

static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{DOC}(?:(?:export|declare|static|public|private|protected|readonly|var|let|const)\s+)*(?P<name>[A-Za-z_$][\w$]*)\??\s*:\s*[^;\n]+"
    ))
    .expect("property pattern")
});

/// A documented declaration found in a chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub kind: ApiKind,
    /// Inside of the documentation block, delimiters removed
    pub doc: &'a str,
    /// Byte offset of the documentation block
    pub offset: usize,
}

/// Documented function-shaped declarations: `name(params): type`
pub fn functions(text: &str) -> Vec<Declaration<'_>> {
    collect(&FUNCTION_RE, text, |_| Some(ApiKind::Function))
}

/// Documented `class` and `interface` headers
pub fn classes(text: &str) -> Vec<Declaration<'_>> {
    collect(&CLASS_RE, text, |caps| match caps.name("kind")?.as_str() {
        "class" => Some(ApiKind::Class),
        _ => Some(ApiKind::Interface),
    })
}

/// Documented typed properties: `name: type`
pub fn properties(text: &str) -> Vec<Declaration<'_>> {
    collect(&PROPERTY_RE, text, |_| Some(ApiKind::Variable))
}

/// Results of all three scans, each in document order
pub fn all(text: &str) -> Vec<Declaration<'_>> {
    let mut out = functions(text);
    out.extend(classes(text));
    out.extend(properties(text));
    out
}

fn collect<'a>(
    re: &Regex,
    text: &'a str,
    kind: impl Fn(&regex::Captures<'a>) -> Option<ApiKind>,
) -> Vec<Declaration<'a>> {
    re.captures_iter(text)
        .filter_map(|caps| {
            Some(Declaration {
                name: caps.name("name")?.as_str(),
                kind: kind(&caps)?,
                doc: caps.name("doc")?.as_str(),
                offset: caps.get(0)?.start(),
            })
        })
        .collect()
}
