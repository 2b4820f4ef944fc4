//! Ignore rules combining the project `.gitignore` with configured globs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::infra::config::Config;

/// Answers "is this path excluded from resolution?".
///
/// Exclusion combines three layers: the `.gitignore` at the project root
/// (absence is fine), extra glob patterns from configuration, and an implicit
/// rule that nothing outside the project root is ever followed.
pub struct IgnoreMatcher {
    root: PathBuf,
    gitignore: Gitignore,
    extra: GlobSet,
}

impl IgnoreMatcher {
    pub fn load(root: &Path, config: &Config) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let gitignore_path = root.join(".gitignore");
        if gitignore_path.exists() {
            builder.add(gitignore_path);
        }
        let gitignore = builder.build().context("failed to parse .gitignore")?;

        Ok(Self {
            root: root.to_path_buf(),
            gitignore,
            extra: build_extra_globs(config)?,
        })
    }

    /// Whether `path` must be excluded from resolution. Expects canonical
    /// absolute paths.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if !path.starts_with(&self.root) {
            return true;
        }

        if self
            .gitignore
            .matched_path_or_any_parents(path, path.is_dir())
            .is_ignore()
        {
            return true;
        }

        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        self.extra.is_match(rel)
    }
}

fn build_extra_globs(config: &Config) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in &config.ignore.paths {
        for expanded in expand_dir_pattern(pattern) {
            let glob = Glob::new(&expanded).context("invalid ignore path pattern")?;
            builder.add(glob);
        }
    }

    for glob in &config.ignore.globs {
        let glob = Glob::new(glob).context("invalid ignore glob")?;
        builder.add(glob);
    }

    builder.build().context("failed to build ignore globs")
}

fn expand_dir_pattern(raw: &str) -> Vec<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    vec![
        trimmed.to_owned(),
        format!("{trimmed}/**"),
        format!("**/{trimmed}"),
        format!("**/{trimmed}/**"),
    ]
}
