//! Mapping raw import specifiers to on-disk project files.

use std::path::{Path, PathBuf};

use crate::domain::model::{ImportSpecifier, Language};
use crate::infra::ignore::IgnoreMatcher;

/// Extension probing order for JS/TS. TypeScript sources win over any
/// compiled JavaScript siblings.
const JS_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// Resolves specifiers against the project root and the importing file's
/// directory, consulting the ignore matcher before admitting a path.
pub struct Resolver<'a> {
    root: &'a Path,
    alias: &'a str,
    ignore: &'a IgnoreMatcher,
}

impl<'a> Resolver<'a> {
    pub fn new(root: &'a Path, alias: &'a str, ignore: &'a IgnoreMatcher) -> Self {
        Self {
            root,
            alias,
            ignore,
        }
    }

    /// Resolve a specifier to an existing project file, or `None` when the
    /// import is external, missing on disk, or ignored. Never fails hard.
    pub fn resolve(
        &self,
        spec: &ImportSpecifier,
        importing: &Path,
        language: Language,
    ) -> Option<PathBuf> {
        let base = self.candidate_base(&spec.raw, importing, language)?;
        let found = probe(&base, language)?;
        let canonical = found.canonicalize().ok()?;

        if self.ignore.is_ignored(&canonical) {
            tracing::debug!(path = %canonical.display(), "resolved dependency is ignored");
            return None;
        }

        Some(canonical)
    }

    fn candidate_base(&self, raw: &str, importing: &Path, language: Language) -> Option<PathBuf> {
        let file_dir = importing.parent().unwrap_or(Path::new(""));

        // Alias specifiers resolve against the project root regardless of
        // language.
        if let Some(rest) = raw.strip_prefix(self.alias)
            && let Some(rest) = rest.strip_prefix('/')
        {
            return Some(self.root.join(rest));
        }

        match language {
            Language::JavaScript => {
                if raw.starts_with("./") || raw.starts_with("../") {
                    Some(file_dir.join(raw))
                } else {
                    // Bare specifiers are external libraries.
                    None
                }
            }
            Language::Python => {
                if raw.starts_with('.') {
                    python_relative(raw, file_dir)
                } else {
                    Some(self.root.join(raw.replace('.', "/")))
                }
            }
            Language::Unknown => None,
        }
    }
}

/// Apply Python's relative-import dot rule: one leading dot anchors at the
/// importing file's directory, each additional dot climbs one level up.
fn python_relative(raw: &str, file_dir: &Path) -> Option<PathBuf> {
    let dots = raw.chars().take_while(|&c| c == '.').count();
    let rest = &raw[dots..];

    let mut dir = file_dir.to_path_buf();
    for _ in 1..dots {
        dir = dir.parent()?.to_path_buf();
    }

    if rest.is_empty() {
        Some(dir)
    } else {
        Some(dir.join(rest.replace('.', "/")))
    }
}

/// Probe a candidate base path for an existing file, trying language-specific
/// extension variants and directory entry points.
fn probe(base: &Path, language: Language) -> Option<PathBuf> {
    if base.is_file() {
        return Some(base.to_path_buf());
    }

    match language {
        Language::Python => {
            if base.extension().is_none() {
                let with_py = base.with_extension("py");
                if with_py.is_file() {
                    return Some(with_py);
                }
            }
            if base.is_dir() {
                let init = base.join("__init__.py");
                if init.is_file() {
                    return Some(init);
                }
            }
            None
        }
        Language::JavaScript => {
            if base.extension().is_none() {
                for ext in JS_EXTENSIONS {
                    let candidate = append_extension(base, ext);
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
            if base.is_dir() {
                for ext in JS_EXTENSIONS {
                    let candidate = base.join(format!("index.{ext}"));
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
            None
        }
        Language::Unknown => None,
    }
}

fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
