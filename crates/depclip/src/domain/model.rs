//! Domain models for source files, import specifiers, and bundles.

use std::path::{Path, PathBuf};

/// Language family of a source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    /// JavaScript and TypeScript, including JSX/TSX.
    JavaScript,
    Unknown,
}

impl Language {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("py") => Language::Python,
            Some("js" | "jsx" | "ts" | "tsx") => Language::JavaScript,
            _ => Language::Unknown,
        }
    }

    /// Whether the extractor knows how to scan this language for imports.
    /// Unknown files can still be collected as leaves, they are just never
    /// scanned further.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Language::Unknown)
    }
}

/// Syntactic form an import specifier was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import x.y [as z]` (Python).
    Import,
    /// `from x.y import name` (Python), including relative dot forms.
    FromImport,
    /// `import ... from "spec"` or bare `import "spec"` (ES modules).
    EsModule,
    /// `export ... from "spec"` re-export.
    EsReExport,
    /// `require("spec")` call.
    Require,
}

/// A raw import specifier as written in source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub raw: String,
    pub kind: ImportKind,
}

impl ImportSpecifier {
    pub fn new(raw: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            raw: raw.into(),
            kind,
        }
    }
}

/// A file collected by the walker, with its contents read exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_extension() {
        assert_eq!(Language::from_path(Path::new("a/b.py")), Language::Python);
        assert_eq!(
            Language::from_path(Path::new("a/b.TSX")),
            Language::JavaScript
        );
        assert_eq!(Language::from_path(Path::new("a/b.rs")), Language::Unknown);
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::Unknown);
    }
}
