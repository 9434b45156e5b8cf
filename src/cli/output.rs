use serde::Serialize;

use crate::scanner::ScanStats;

/// Summary printed after a scan into the catalog.
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub root: String,
    pub database: String,
    pub files: u64,
    pub folders: u64,
    pub entries: u64,
}

impl ScanSummary {
    #[must_use]
    pub fn new(root: &std::path::Path, database: &std::path::Path, stats: ScanStats) -> Self {
        Self {
            root: root.to_string_lossy().into_owned(),
            database: database.to_string_lossy().into_owned(),
            files: stats.files,
            folders: stats.folders,
            entries: stats.total(),
        }
    }
}

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
