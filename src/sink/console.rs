use std::io::Write;

use serde::{Deserialize, Serialize};

use super::{EntrySink, IdSequence};
use crate::error::{Result, ScanError};
use crate::models::FileSystemEntry;

/// Line format used by the console sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Name: .., Size: .., Path: ..` lines.
    #[default]
    Text,
    /// One JSON object per entry.
    Jsonl,
}

/// Writes one line per entry to a writer (stdout in the binary).
pub struct ConsoleSink<W: Write> {
    out: W,
    format: OutputFormat,
    ids: IdSequence,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            ids: IdSequence::default(),
        }
    }

    /// Flush and hand back the writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush().map_err(ScanError::Output)?;
        Ok(self.out)
    }

    fn write_entry(&mut self, entry: &FileSystemEntry) -> Result<()> {
        let line = match self.format {
            OutputFormat::Text => format_text_line(entry),
            OutputFormat::Jsonl => serde_json::to_string(entry)?,
        };
        writeln!(self.out, "{line}").map_err(ScanError::Output)
    }
}

impl<W: Write> EntrySink for ConsoleSink<W> {
    fn record_file(&mut self, entry: &FileSystemEntry) -> Result<()> {
        self.write_entry(entry)
    }

    fn record_folder(&mut self, entry: &FileSystemEntry) -> Result<i64> {
        let id = self.ids.next_id();
        self.write_entry(&FileSystemEntry {
            id: Some(id),
            ..entry.clone()
        })?;
        Ok(id)
    }
}

/// Human-readable line for an entry.
#[must_use]
pub fn format_text_line(entry: &FileSystemEntry) -> String {
    if entry.is_folder {
        format!("Directory name: {}, Path: {}", entry.name, entry.path)
    } else {
        format!(
            "Name: {}, Size: {}, Path: {}",
            entry.name, entry.size, entry.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn text_lines_for_files_and_folders() {
        let mut sink = ConsoleSink::new(Vec::new(), OutputFormat::Text);
        sink.record_file(&FileSystemEntry::file(Path::new("/data/a.txt"), 10, None))
            .unwrap();
        let id = sink
            .record_folder(&FileSystemEntry::folder(Path::new("/data/sub"), None))
            .unwrap();
        assert_eq!(id, 1);

        let out = lines(sink.into_inner().unwrap());
        assert_eq!(
            out,
            vec![
                "Name: a.txt, Size: 10, Path: /data/a.txt",
                "Directory name: sub, Path: /data/sub",
            ]
        );
    }

    #[test]
    fn jsonl_lines_carry_ids() {
        let mut sink = ConsoleSink::new(Vec::new(), OutputFormat::Jsonl);
        let id = sink
            .record_folder(&FileSystemEntry::folder(Path::new("/data/sub"), None))
            .unwrap();
        sink.record_file(&FileSystemEntry::file(Path::new("/data/sub/b.txt"), 5, Some(id)))
            .unwrap();

        let out = lines(sink.into_inner().unwrap());
        assert_eq!(out.len(), 2);
        let folder: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
        assert_eq!(folder["id"], 1);
        assert_eq!(folder["is_folder"], true);
        assert_eq!(folder["size"], 0);
        let file: serde_json::Value = serde_json::from_str(&out[1]).unwrap();
        assert_eq!(file["parent_id"], 1);
        assert_eq!(file["name"], "b.txt");
        assert!(file["id"].is_null());
    }

    #[test]
    fn write_failure_is_an_output_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = ConsoleSink::new(Broken, OutputFormat::Text);
        let err = sink
            .record_file(&FileSystemEntry::file(Path::new("/a"), 1, None))
            .unwrap_err();
        assert!(matches!(err, ScanError::Output(_)));
    }

    #[test]
    fn output_format_parses_from_toml_names() {
        #[derive(Deserialize)]
        struct Wrap {
            format: OutputFormat,
        }
        let w: Wrap = toml::from_str("format = \"jsonl\"").unwrap();
        assert_eq!(w.format, OutputFormat::Jsonl);
    }
}
