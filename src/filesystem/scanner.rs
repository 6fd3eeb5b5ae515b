use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use regex::Regex;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::filesystem::FileRecord;
use crate::format::{format_size, format_timestamp};

/// Recursively collect every file under `root`.
///
/// `ignore` is tested against each entry's base name at every depth; a
/// matching directory is pruned with its whole subtree. The root itself is
/// never tested. Records come back in directory-listing order.
///
/// Fails unless `root` is an existing directory.
pub fn scan_files(root: &Path, ignore: &Regex) -> Result<Vec<FileRecord>> {
    let root_metadata = fs::metadata(root).map_err(|source| Error::Stat {
        path: root.to_path_buf(),
        source,
    })?;
    if !root_metadata.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry, ignore));

    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        // Follows symlinks, so a dangling link is a stat failure.
        let path = entry.path();
        let metadata = fs::metadata(path).map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        let modified = metadata.modified().map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        let mod_time: DateTime<Local> = modified.into();

        let relative = path.strip_prefix(root).unwrap_or(path);
        let record = FileRecord {
            name: entry.file_name().to_string_lossy().to_string(),
            relative_path: relative.to_string_lossy().to_string(),
            size: format_size(metadata.len()),
            mtime: format_timestamp(&mod_time),
        };
        debug!(path = %record.relative_path, size = %record.size, "found file");
        files.push(record);
    }

    Ok(files)
}

fn is_ignored(entry: &DirEntry, ignore: &Regex) -> bool {
    ignore.is_match(&entry.file_name().to_string_lossy())
}
