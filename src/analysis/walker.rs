// Tree walker: enumerates candidate files under a root, pruning excluded
// directories without descending into them.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

/// Wall-clock budget for a single scan. Checked at every traversal and
/// processing step; an exceeded budget fails the whole scan rather than
/// returning a truncated snapshot.
#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start the clock with the given budget
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// Err(Timeout) once the budget is exhausted
    pub fn check(&self) -> Result<()> {
        let elapsed = self.started.elapsed();
        if elapsed >= self.budget {
            Err(Error::timeout(elapsed.as_secs(), self.budget.as_secs()))
        } else {
            Ok(())
        }
    }
}

/// Outcome of a completed walk
#[derive(Debug, Default)]
pub struct Walk {
    /// All non-excluded regular files, sorted for deterministic ordering
    pub files: Vec<PathBuf>,
    /// Entries that could not be read; never fatal
    pub warnings: Vec<String>,
}

/// Recursive file enumerator with directory-name exclusion.
///
/// Exclusion matches directory names (not paths) at any depth and prunes
/// the whole subtree, so a vendored dependency tree is skipped without
/// being traversed. Symbolic links are never followed.
pub struct TreeWalker {
    exclude: BTreeSet<String>,
}

impl TreeWalker {
    /// Create a walker with the given exclusion set
    pub fn new(exclude: impl IntoIterator<Item = String>) -> Self {
        Self {
            exclude: exclude.into_iter().collect(),
        }
    }

    /// Walk the tree under `root`, respecting the deadline.
    ///
    /// Fails with `PathNotFound` when the root does not exist and
    /// `PathNotAccessible` when it exists but cannot be read as a
    /// directory.
    pub fn walk(&self, root: &Path, deadline: &Deadline) -> Result<Walk> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() || std::fs::read_dir(root).is_err() {
            return Err(Error::PathNotAccessible(root.to_path_buf()));
        }

        let mut walk = Walk::default();

        let entries = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in entries {
            deadline.check()?;

            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    walk.warnings.push(format!("Skipped unreadable entry: {}", e));
                    continue;
                }
            };

            if entry.file_type().is_file() {
                walk.files.push(entry.into_path());
            }
        }

        walk.files.sort();
        Ok(walk)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        entry
            .file_name()
            .to_str()
            .map(|name| self.exclude.contains(name))
            .unwrap_or(false)
    }
}
