use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::error::{BundleError, Result};

/// What a rendered page is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The flattened declaration file
    Bundle,
    /// Combined Markdown reference
    Markdown,
    /// Help-dialect page for one module
    HelpPage { module: String },
    /// Help-dialect master index
    Index,
    /// Fetched library source
    Library,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundle => write!(f, "bundle"),
            Self::Markdown => write!(f, "markdown"),
            Self::HelpPage { module } => write!(f, "help page ({})", module),
            Self::Index => write!(f, "index"),
            Self::Library => write!(f, "library"),
        }
    }
}

/// A fully rendered output, written once
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub kind: ArtifactKind,
    pub destination: PathBuf,
    pub content: String,
}

impl OutputArtifact {
    pub fn new(kind: ArtifactKind, destination: impl Into<PathBuf>, content: String) -> Self {
        Self {
            kind,
            destination: destination.into(),
            content,
        }
    }

    /// Write the artifact, creating parent directories.
    ///
    /// Consumes the artifact: nothing mutates it after it reaches disk.
    pub fn write(self) -> Result<PathBuf> {
        if let Some(parent) = self.destination.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| BundleError::write(parent, e))?;
        }
        fs::write(&self.destination, &self.content)
            .map_err(|e| BundleError::write(&self.destination, e))?;
        debug!(
            "Wrote {} ({} bytes) to {}",
            self.kind,
            self.content.len(),
            self.destination.display()
        );
        Ok(self.destination)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.destination.file_name().and_then(|n| n.to_str())
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("doc/nested/p5.txt");
        let artifact = OutputArtifact::new(ArtifactKind::Index, &dest, "hello\n".to_string());
        assert_eq!(artifact.file_name(), Some("p5.txt"));

        let written = artifact.write().unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "hello\n");
    }
}
