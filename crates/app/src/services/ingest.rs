use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use ingest::SyncStats;
use watch_db::Db;

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn run(&self) -> Result<SyncStats> {
        let mut db = self.db()?;
        Ok(ingest::sync_gemini_home(&mut db, &self.config.gemini_home)?)
    }
}
