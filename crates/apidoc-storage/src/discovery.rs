//! Definition discovery
//!
//! Walks the documentation directory and lists every definition file it
//! finds, so the viewer has something to show when no URL is configured.

use apidoc_common::types::DefinitionUrl;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions recognised as OpenAPI/Swagger definitions
pub const DEFINITION_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Whether a path names a definition file
pub fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| DEFINITION_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Discover definition files below `root`.
///
/// Symlinks are followed as long as they resolve inside `root`; anything
/// that resolves elsewhere could not be served and is skipped. Entries are
/// named after their file name and point at their path relative to `root`,
/// using forward slashes. Results are ordered by path. A missing root yields
/// no definitions, and directories that cannot be read are skipped.
pub fn discover_definitions(root: &Path) -> Vec<DefinitionUrl> {
    let canonical_root = match root.canonicalize() {
        Ok(path) if path.is_dir() => path,
        _ => {
            warn!(path = %root.display(), "Documentation directory not found, no definitions discovered");
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    let mut visited = HashSet::new();
    walk(root, "", &canonical_root, &mut visited, &mut found);

    debug!(path = %root.display(), count = found.len(), "Discovered definitions");

    found
}

fn walk(
    dir: &Path,
    prefix: &str,
    root: &Path,
    visited: &mut HashSet<PathBuf>,
    found: &mut Vec<DefinitionUrl>,
) {
    let canonical = match dir.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Skipping directory that cannot be resolved");
            return;
        }
    };
    if !canonical.starts_with(root) {
        debug!(path = %dir.display(), "Skipping directory outside documentation root");
        return;
    }
    // Symlink cycles would otherwise recurse forever
    if !visited.insert(canonical) {
        return;
    }

    let mut entries: Vec<_> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(path = %dir.display(), error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();

        // URLs are built from the name, a lossy conversion would not resolve
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!(name = ?raw, "Skipping entry with non UTF-8 name");
                continue;
            }
        };
        let url = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", prefix, name)
        };

        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if metadata.is_dir() {
            walk(&path, &url, root, visited, found);
        } else if metadata.is_file() && is_definition_file(&path) {
            match path.canonicalize() {
                Ok(target) if target.starts_with(root) => {
                    found.push(DefinitionUrl::new(name, url));
                }
                _ => debug!(path = %path.display(), "Skipping file outside documentation root"),
            }
        }
    }
}
