//! File enumeration for aggregation.

use crate::manifest::{ARTIFACT_FILE, MANIFEST_FILE};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File and directory names left out of aggregation.
///
/// The manifest and any previously generated artifact are always
/// excluded; version-control and dependency-metadata directories are
/// pruned without descending.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    pub files: BTreeSet<String>,
    pub dirs: BTreeSet<String>,
}

impl Default for ExcludeSet {
    fn default() -> Self {
        ExcludeSet {
            files: [MANIFEST_FILE, ARTIFACT_FILE]
                .into_iter()
                .map(String::from)
                .collect(),
            dirs: [".git", "node_modules"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ExcludeSet {
    pub fn with_extra(extra_files: &[String], extra_dirs: &[String]) -> Self {
        let mut set = ExcludeSet::default();
        set.files.extend(extra_files.iter().cloned());
        set.dirs.extend(extra_dirs.iter().cloned());
        set
    }
}

/// Walk a skill folder, lazily yielding file paths relative to `root`.
///
/// Entries come back in lexicographic file-name order so aggregated
/// output is stable across platforms. Symbolic links are not followed.
pub fn collect_files<'a>(
    root: &Path,
    exclude: &'a ExcludeSet,
) -> impl Iterator<Item = PathBuf> + 'a {
    let base = root.to_path_buf();
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                !exclude.dirs.contains(name.as_ref())
            } else {
                !exclude.files.contains(name.as_ref())
            }
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| entry.path().strip_prefix(&base).map(PathBuf::from).ok())
}
