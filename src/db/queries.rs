use rusqlite::params;

use crate::error::Result;
use crate::models::FileSystemEntry;
use crate::sink::EntrySink;

use super::Database;

impl Database {
    // ─── Entry operations ───

    /// Insert a file entry. Each call is its own autocommitted statement.
    pub fn insert_file(&self, entry: &FileSystemEntry) -> Result<()> {
        let mut stmt = self.conn().prepare_cached(
            "INSERT INTO file_system_entry (name, path, size, is_folder, parent_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        stmt.execute(params![
            entry.name,
            entry.path,
            entry.size as i64,
            entry.is_folder,
            entry.parent_id,
        ])?;
        Ok(())
    }

    /// Insert a folder entry and return its generated ID.
    pub fn insert_folder(&self, entry: &FileSystemEntry) -> Result<i64> {
        let mut stmt = self.conn().prepare_cached(
            "INSERT INTO file_system_entry (name, path, size, is_folder, parent_id)
             VALUES (?1, ?2, 0, 1, ?3)
             RETURNING id",
        )?;
        let id: i64 = stmt.query_row(params![entry.name, entry.path, entry.parent_id], |row| {
            row.get(0)
        })?;
        Ok(id)
    }

    /// Total number of recorded entries.
    pub fn count_entries(&self) -> Result<u64> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM file_system_entry", [], |r| r.get(0))?;
        Ok(count as u64)
    }
}

impl EntrySink for Database {
    fn record_file(&mut self, entry: &FileSystemEntry) -> Result<()> {
        self.insert_file(entry)
    }

    fn record_folder(&mut self, entry: &FileSystemEntry) -> Result<i64> {
        self.insert_folder(entry)
    }
}
