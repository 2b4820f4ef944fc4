//! Project root discovery.

use std::path::{Path, PathBuf};

/// Locate the project root anchoring alias resolution and ignore loading.
///
/// Tries full repository discovery through [`gix`] first, then falls back to
/// walking up the tree looking for a `.git` marker. When neither succeeds the
/// entry file's own directory is used as the root and a warning is emitted.
pub fn find_project_root(entry: &Path) -> PathBuf {
    let start = if entry.is_dir() {
        entry
    } else {
        entry.parent().unwrap_or(entry)
    };

    if let Ok(repo) = gix::discover(start)
        && let Some(root) = repo.work_dir()
    {
        return root.to_path_buf();
    }

    if let Some(root) = find_git_marker(start) {
        return root;
    }

    tracing::warn!(
        path = %start.display(),
        "no git repository found, using the entry directory as project root"
    );
    start.to_path_buf()
}

fn find_git_marker(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}
