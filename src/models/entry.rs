use std::path::Path;

use serde::Serialize;

/// One file or directory recorded by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSystemEntry {
    /// Identity assigned by the sink (`None` until recorded).
    pub id: Option<i64>,
    /// Base name of the entry, converted lossily like `path`.
    pub name: String,
    /// Absolute path of the entry. Converted lossily: bytes that are not valid
    /// UTF-8 become U+FFFD, so two distinct non-UTF-8 names can share a path.
    pub path: String,
    /// Byte length for files, always 0 for folders.
    pub size: u64,
    pub is_folder: bool,
    /// Identity of the directory that directly contains this entry.
    /// `None` for direct children of the scan root.
    pub parent_id: Option<i64>,
}

impl FileSystemEntry {
    #[must_use]
    pub fn file(path: &Path, size: u64, parent_id: Option<i64>) -> Self {
        Self {
            id: None,
            name: base_name(path),
            path: path.to_string_lossy().into_owned(),
            size,
            is_folder: false,
            parent_id,
        }
    }

    #[must_use]
    pub fn folder(path: &Path, parent_id: Option<i64>) -> Self {
        Self {
            id: None,
            name: base_name(path),
            path: path.to_string_lossy().into_owned(),
            size: 0,
            is_folder: true,
            parent_id,
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned()
}
