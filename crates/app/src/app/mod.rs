use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::services::AppServices;
use watch_db::Db;

/// Where the store lives and which Gemini home to read session logs from.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub gemini_home: PathBuf,
}

/// Application state handed to frontends (CLI, dashboard).
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, gemini_home: PathBuf) -> Self {
        let config = AppConfig {
            db_path,
            gemini_home,
        };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))
    }

    /// Pulls new session records into the store and returns how many were added.
    pub fn refresh_data(&self) -> Result<usize> {
        self.services
            .ingest
            .run()
            .map(|stats| stats.records_inserted)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let db = Db::open(path)?;
    db.initialize()?;
    Ok(())
}
