//! Destinations for entries emitted by the scanner.
//!
//! A sink receives every entry in traversal order. Folders are handed out an
//! identity as they are recorded so that the scanner can stamp it onto the
//! entries found inside them.

pub mod console;

pub use console::{ConsoleSink, OutputFormat};

use crate::error::Result;
use crate::models::FileSystemEntry;

/// Anything that can record scanned entries.
pub trait EntrySink {
    /// Record a non-folder entry.
    fn record_file(&mut self, entry: &FileSystemEntry) -> Result<()>;

    /// Record a folder entry and return the identity its children will reference.
    fn record_folder(&mut self, entry: &FileSystemEntry) -> Result<i64>;
}

impl<S: EntrySink + ?Sized> EntrySink for &mut S {
    fn record_file(&mut self, entry: &FileSystemEntry) -> Result<()> {
        (**self).record_file(entry)
    }

    fn record_folder(&mut self, entry: &FileSystemEntry) -> Result<i64> {
        (**self).record_folder(entry)
    }
}

/// Sequential identities for sinks without a storage-generated key.
#[derive(Debug, Clone)]
pub(crate) struct IdSequence {
    next: i64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub(crate) fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Keeps every recorded entry in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Vec<FileSystemEntry>,
    ids: IdSequence,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[FileSystemEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<FileSystemEntry> {
        self.entries
    }
}

impl EntrySink for CollectingSink {
    fn record_file(&mut self, entry: &FileSystemEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn record_folder(&mut self, entry: &FileSystemEntry) -> Result<i64> {
        let id = self.ids.next_id();
        self.entries.push(FileSystemEntry {
            id: Some(id),
            ..entry.clone()
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn collecting_sink_assigns_folder_ids() {
        let mut sink = CollectingSink::new();
        let a = sink
            .record_folder(&FileSystemEntry::folder(Path::new("/r/a"), None))
            .unwrap();
        sink.record_file(&FileSystemEntry::file(Path::new("/r/a/f"), 1, Some(a)))
            .unwrap();
        let b = sink
            .record_folder(&FileSystemEntry::folder(Path::new("/r/b"), None))
            .unwrap();

        assert_eq!((a, b), (1, 2));
        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, Some(1));
        assert_eq!(entries[1].id, None);
        assert_eq!(entries[1].parent_id, Some(1));
        assert_eq!(entries[2].id, Some(2));
    }

    #[test]
    fn mutable_reference_is_a_sink() {
        fn record(mut sink: impl EntrySink) -> i64 {
            sink.record_folder(&FileSystemEntry::folder(Path::new("/x"), None))
                .unwrap()
        }
        let mut sink = CollectingSink::new();
        assert_eq!(record(&mut sink), 1);
        assert_eq!(sink.into_entries().len(), 1);
    }
}
