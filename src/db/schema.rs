/// SQL statements for creating the catalog schema.
pub const CREATE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS file_system_entry (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    path TEXT NOT NULL,
    size INTEGER NOT NULL CHECK (size >= 0),
    is_folder INTEGER NOT NULL CHECK (is_folder IN (0, 1)),
    parent_id INTEGER REFERENCES file_system_entry(id)
);

CREATE INDEX IF NOT EXISTS idx_file_system_entry_parent_id ON file_system_entry(parent_id);
";

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_creates_without_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_SCHEMA).unwrap();
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_SCHEMA).unwrap();
        conn.execute_batch(CREATE_SCHEMA).unwrap();
    }

    #[test]
    fn schema_rejects_negative_size() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_SCHEMA).unwrap();
        let res = conn.execute(
            "INSERT INTO file_system_entry (name, path, size, is_folder) VALUES ('a', '/a', -1, 0)",
            [],
        );
        assert!(res.is_err());
    }
}
