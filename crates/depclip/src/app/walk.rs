//! Breadth-first traversal of the import graph.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::extract;
use crate::app::resolve::Resolver;
use crate::domain::errors::WalkError;
use crate::domain::model::{Language, SourceFile};
use crate::infra::ignore::IgnoreMatcher;

/// Walks the transitive import closure of an entry file.
///
/// An explicit queue plus a visited set of canonical paths keeps the walk
/// terminating on cycles and self-imports without recursion depth limits.
pub struct Walker<'a> {
    resolver: Resolver<'a>,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, alias: &'a str, ignore: &'a IgnoreMatcher) -> Self {
        Self {
            resolver: Resolver::new(root, alias, ignore),
        }
    }

    /// Collect the entry file and every reachable project dependency in
    /// discovery order: entry first, then its direct imports in extraction
    /// order, then theirs. Each file appears at most once, at the position of
    /// its first discovery.
    ///
    /// Only a missing or unreadable entry is fatal. Every other failure is
    /// logged and skipped so one broken import cannot spoil the bundle.
    pub fn walk(&self, entry: &Path) -> Result<Vec<SourceFile>, WalkError> {
        let entry = entry
            .canonicalize()
            .map_err(|_| WalkError::EntryNotFound(entry.to_path_buf()))?;

        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut queue: VecDeque<PathBuf> = VecDeque::new();
        queue.push_back(entry.clone());

        let mut collected = Vec::new();
        while let Some(path) = queue.pop_front() {
            if !visited.insert(path.clone()) {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(_) if path == entry => {
                    return Err(WalkError::EntryNotFound(entry));
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable dependency"
                    );
                    continue;
                }
            };

            let language = Language::from_path(&path);
            if language.is_supported() {
                for spec in extract::extract(&contents, language) {
                    match self.resolver.resolve(&spec, &path, language) {
                        Some(dep) => {
                            if !visited.contains(&dep) {
                                queue.push_back(dep);
                            }
                        }
                        None => {
                            tracing::debug!(
                                specifier = %spec.raw,
                                from = %path.display(),
                                "specifier left unresolved"
                            );
                        }
                    }
                }
            }

            collected.push(SourceFile {
                path,
                language,
                contents,
            });
        }

        Ok(collected)
    }
}
