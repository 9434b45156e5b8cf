use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::scanner::SymlinkPolicy;
use crate::sink::OutputFormat;

/// State directory created in the working directory.
const STATE_DIR: &str = ".treescan";
/// Default catalog filename.
const DB_FILE: &str = "catalog.db";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";
/// Environment variable that points at the catalog database.
pub const DB_ENV_VAR: &str = "TREESCAN_DB";

/// Configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory relative paths are resolved against.
    pub working_dir: PathBuf,
    /// Path to the `.treescan/` directory.
    pub state_dir: PathBuf,
    /// Default catalog location inside the state directory.
    pub default_db_path: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .treescan/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub scan: ScanSettings,
    pub output: OutputSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// How symbolic links are treated: "record", "skip" or "follow".
    pub symlinks: SymlinkPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Console line format: "text" or "jsonl".
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Catalog database path, relative to the working directory.
    pub database: Option<String>,
}

impl Config {
    /// Create config for a given working directory.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        let state_dir = working_dir.join(STATE_DIR);
        let default_db_path = state_dir.join(DB_FILE);
        let config_path = state_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            working_dir,
            state_dir,
            default_db_path,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| ScanError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists and parses.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Ensure the `.treescan/` directory exists.
    pub fn ensure_state_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }

    /// Pick the catalog path: explicit flag, then environment, then config file,
    /// then the default inside the state directory.
    #[must_use]
    pub fn database_path(&self, flag: Option<&Path>, env: Option<OsString>) -> PathBuf {
        let chosen = flag
            .map(Path::to_path_buf)
            .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.settings.storage.database.as_ref().map(PathBuf::from));
        match chosen {
            Some(path) => self.working_dir.join(path),
            None => self.default_db_path.clone(),
        }
    }

    /// Paths the scanner must not record: the state directory, and when given,
    /// the catalog database with its SQLite sidecar files.
    #[must_use]
    pub fn own_files(&self, db_path: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = vec![self.state_dir.clone()];
        if let Some(db) = db_path {
            let db = std::path::absolute(db).unwrap_or_else(|_| db.to_path_buf());
            paths.push(db.clone());
            for suffix in ["-wal", "-shm", "-journal"] {
                let mut sidecar = db.as_os_str().to_owned();
                sidecar.push(suffix);
                paths.push(PathBuf::from(sidecar));
            }
        }
        paths
    }
}
