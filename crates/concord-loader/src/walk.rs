use crate::error::LoaderError;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lists `root` and every directory below it, depth-first, siblings sorted by
/// file name. Symlinks are not followed.
///
/// Paths keep the root as given, so walking `.` yields `.`, `./a`, `./a/b`.
/// An unreadable root is an error; unreadable subtrees are logged and
/// skipped.
pub fn walk_directories(root: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    if !root.is_dir() {
        return Err(LoaderError::NotADirectory(root.to_path_buf()));
    }
    let mut directories = Vec::new();
    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let depth = source.depth();
                let path = source.path().unwrap_or(root).to_path_buf();
                let err = LoaderError::Walk { path, source };
                if depth == 0 {
                    return Err(err);
                }
                warn!(error = %err, "skipping unreadable subtree");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            directories.push(entry.into_path());
        }
    }
    Ok(directories)
}
