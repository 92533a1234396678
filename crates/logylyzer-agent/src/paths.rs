//! Expansion of configured log path globs into concrete files.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::AgentError;

/// Files matching any of `patterns` and none of `excludes`, sorted.
///
/// Exclusions are tested against both the full path and the bare file name,
/// so `*.gz` excludes compressed files in any directory.
pub fn expand_log_paths(patterns: &[String], excludes: &[String]) -> Result<Vec<PathBuf>, AgentError> {
    let exclude_set = build_set(excludes)?;
    let mut files = Vec::new();

    for pattern in patterns {
        let matcher = glob(pattern)?.compile_matcher();
        let root = literal_prefix(Path::new(pattern));

        let mut walker = WalkDir::new(root.as_deref().unwrap_or(Path::new("."))).follow_links(true);
        if !pattern.contains("**") {
            let depth = Path::new(pattern).components().count()
                - root.as_ref().map_or(0, |r| r.components().count());
            walker = walker.max_depth(depth);
        }

        for entry in walker
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            // Relative patterns without a literal prefix are walked from `.`.
            let path = match root {
                Some(_) => entry.path(),
                None => entry.path().strip_prefix(".").unwrap_or(entry.path()),
            };
            if !matcher.is_match(path) || is_excluded(&exclude_set, path) {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Service name for a log file: its base name without extension.
pub fn service_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_excluded(excludes: &GlobSet, path: &Path) -> bool {
    excludes.is_match(path) || path.file_name().is_some_and(|name| excludes.is_match(name))
}

fn glob(pattern: &str) -> Result<Glob, AgentError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| AgentError::Pattern(format!("{pattern}: {e}")))
}

fn build_set(patterns: &[String]) -> Result<GlobSet, AgentError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(glob(pattern)?);
    }
    builder
        .build()
        .map_err(|e| AgentError::Pattern(e.to_string()))
}

/// Leading directory components that contain no glob metacharacters, or
/// `None` when the very first component is already a pattern.
fn literal_prefix(pattern: &Path) -> Option<PathBuf> {
    let mut root = PathBuf::new();
    for component in pattern.components() {
        let literal = match component {
            Component::Normal(part) => !part
                .to_string_lossy()
                .contains(['*', '?', '[', ']', '{', '}']),
            _ => true,
        };
        if !literal {
            break;
        }
        root.push(component);
    }

    // A pattern without metacharacters names a file; walk its parent.
    if root == pattern {
        root.pop();
    }
    (!root.as_os_str().is_empty()).then_some(root)
}
