use std::path::PathBuf;

use tavla_core::AppConfig;
use tavla_store::{BoardService, SqliteStore};

pub struct CliContext {
    pub service: BoardService<SqliteStore>,
}

impl CliContext {
    /// Resolve the database path (CLI arg / TAVLA_DB env beats the config
    /// file, which beats the working-directory default) and open the store.
    pub fn open(database: Option<PathBuf>) -> Self {
        let path = database.unwrap_or_else(|| AppConfig::load().effective_database_path());
        tracing::debug!(path = %path.display(), "opening board database");
        Self {
            service: BoardService::new(SqliteStore::new(path)),
        }
    }
}
