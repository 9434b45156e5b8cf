//! Depth-first walk that hands every file and folder under a root to a sink.
//!
//! At each level the files of a directory are emitted first, then each
//! subdirectory in listing order: its folder entry is recorded (yielding the
//! identity its children reference) and the walk descends into it before
//! moving on to the next sibling. Listing order is whatever the platform's
//! `read_dir` returns; nothing is sorted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::models::FileSystemEntry;
use crate::sink::EntrySink;

/// What to do with symbolic links found during the walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymlinkPolicy {
    /// Record the link itself as a non-folder entry; never descend through it.
    #[default]
    Record,
    /// Leave links out of the catalog.
    Skip,
    /// Resolve links and treat them as their target. Link cycles are not detected.
    Follow,
}

/// Counts of entries emitted by a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files: u64,
    pub folders: u64,
}

impl ScanStats {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.files + self.folders
    }
}

/// Immediate contents of one directory, split by kind.
#[derive(Debug, Default)]
struct Listing {
    files: Vec<(PathBuf, u64)>,
    subdirs: Vec<PathBuf>,
}

/// A directory whose files are emitted and whose subdirectories are pending.
struct Frame {
    subdirs: std::vec::IntoIter<PathBuf>,
    parent_id: Option<i64>,
}

/// Sequential tree scanner.
pub struct Scanner {
    root: PathBuf,
    symlinks: SymlinkPolicy,
    /// Absolute paths left out of the walk, with everything beneath them.
    excluded: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            symlinks: SymlinkPolicy::default(),
            excluded: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_symlinks(mut self, policy: SymlinkPolicy) -> Self {
        self.symlinks = policy;
        self
    }

    /// Leave `paths` out of the catalog, e.g. the catalog database itself when
    /// it lives under the scan root. Paths must be absolute.
    #[must_use]
    pub fn with_excluded(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.excluded.extend(paths);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree under the root, recording every entry into `sink`.
    ///
    /// The root itself is not recorded; its direct entries carry no parent.
    /// The first listing or sink failure aborts the walk. Entries recorded
    /// before the failure stay recorded.
    pub fn scan(&self, mut sink: impl EntrySink) -> Result<ScanStats> {
        let root = std::path::absolute(&self.root).map_err(|e| ScanError::access(&self.root, e))?;
        tracing::info!(root = %root.display(), symlinks = ?self.symlinks, "scan started");

        let mut stats = ScanStats::default();
        let mut stack = vec![self.visit(&root, None, &mut sink, &mut stats)?];

        while let Some(frame) = stack.last_mut() {
            let Some(dir) = frame.subdirs.next() else {
                stack.pop();
                continue;
            };
            let entry = FileSystemEntry::folder(&dir, frame.parent_id);
            let id = sink.record_folder(&entry)?;
            tracing::trace!(path = %dir.display(), id, "folder recorded");
            stats.folders += 1;

            let child = self.visit(&dir, Some(id), &mut sink, &mut stats)?;
            stack.push(child);
        }

        tracing::info!(files = stats.files, folders = stats.folders, "scan finished");
        Ok(stats)
    }

    /// List `dir`, record its files, and return a frame holding its subdirectories.
    fn visit(
        &self,
        dir: &Path,
        parent_id: Option<i64>,
        sink: &mut impl EntrySink,
        stats: &mut ScanStats,
    ) -> Result<Frame> {
        let listing = self.list(dir)?;
        for (path, size) in &listing.files {
            sink.record_file(&FileSystemEntry::file(path, *size, parent_id))?;
            tracing::trace!(path = %path.display(), size, "file recorded");
            stats.files += 1;
        }
        Ok(Frame {
            subdirs: listing.subdirs.into_iter(),
            parent_id,
        })
    }

    fn list(&self, dir: &Path) -> Result<Listing> {
        let read = fs::read_dir(dir).map_err(|e| ScanError::access(dir, e))?;
        let mut listing = Listing::default();

        for item in read {
            let item = item.map_err(|e| ScanError::access(dir, e))?;
            let path = item.path();
            if self.excluded.contains(&path) {
                tracing::debug!(path = %path.display(), "excluded from scan");
                continue;
            }
            let file_type = item.file_type().map_err(|e| ScanError::access(&path, e))?;

            if file_type.is_symlink() {
                match self.symlinks {
                    SymlinkPolicy::Skip => {
                        tracing::debug!(path = %path.display(), "skipping symlink");
                    }
                    SymlinkPolicy::Record => {
                        let meta =
                            fs::symlink_metadata(&path).map_err(|e| ScanError::access(&path, e))?;
                        listing.files.push((path, meta.len()));
                    }
                    SymlinkPolicy::Follow => {
                        let meta = fs::metadata(&path).map_err(|e| ScanError::access(&path, e))?;
                        if meta.is_dir() {
                            listing.subdirs.push(path);
                        } else {
                            listing.files.push((path, meta.len()));
                        }
                    }
                }
            } else if file_type.is_dir() {
                listing.subdirs.push(path);
            } else {
                let meta = item.metadata().map_err(|e| ScanError::access(&path, e))?;
                listing.files.push((path, meta.len()));
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            files = listing.files.len(),
            subdirs = listing.subdirs.len(),
            "listed directory"
        );
        Ok(listing)
    }
}
