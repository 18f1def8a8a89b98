//! File enumeration for project scans
//!
//! Walks a project tree collecting files whose root-relative path matches a
//! glob, pruning excluded directories (virtual environments, caches) without
//! descending into them. Results are sorted so reports stay stable across
//! runs on the same tree.

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names that are never worth scanning
const DEFAULT_EXCLUDED_DIRS: &[&str] = &["venv", ".venv", "__pycache__"];

/// Enumerates candidate files under a scan root
pub struct FileWalker {
    root: PathBuf,
    excluded_dirs: Vec<String>,
}

impl FileWalker {
    /// Create a walker with the default excluded directories
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_excludes(root, &[])
    }

    /// Create a walker with additional excluded directory names
    /// Note: the defaults (venv, .venv, __pycache__) are always applied
    pub fn with_excludes(root: impl Into<PathBuf>, extra: &[String]) -> Self {
        let mut excluded_dirs: Vec<String> = DEFAULT_EXCLUDED_DIRS
            .iter()
            .map(|s| s.to_string())
            .collect();
        for name in extra {
            if !excluded_dirs.contains(name) {
                excluded_dirs.push(name.clone());
            }
        }

        Self {
            root: root.into(),
            excluded_dirs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect all files whose root-relative path matches `pattern`
    pub fn files_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.files_matching_excluding(pattern, &[])
    }

    /// Collect matching files, also pruning `extra_dirs` for this walk only
    ///
    /// The breaking-change source scan prunes `migrations` on top of the
    /// walker's standing excludes; the migration scan must not.
    pub fn files_matching_excluding(
        &self,
        pattern: &str,
        extra_dirs: &[&str],
    ) -> Result<Vec<PathBuf>> {
        let matcher = Self::compile_glob(pattern)?;

        // filter_entry requires an owned 'static closure
        let excluded: Vec<String> = self
            .excluded_dirs
            .iter()
            .cloned()
            .chain(extra_dirs.iter().map(|dir| dir.to_string()))
            .collect();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .filter_entry(move |entry| {
                let name = entry.file_name().to_string_lossy();
                !excluded.iter().any(|dir| name == dir.as_str())
            })
            .build();

        let mut files = Vec::new();
        for entry in walker.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if let Ok(relative) = path.strip_prefix(&self.root) {
                if matcher.is_match(relative) {
                    files.push(path.to_path_buf());
                }
            }
        }

        // Directory order is platform-defined; sort for stable output
        files.sort();
        Ok(files)
    }

    /// Make a path relative to the scan root for reporting
    pub fn relativize<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
        let glob = Glob::new(pattern)
            .with_context(|| format!("Invalid file pattern: {}", pattern))?;
        Ok(glob.compile_matcher())
    }
}
