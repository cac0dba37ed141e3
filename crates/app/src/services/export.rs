use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::{ExportFormat, write_csv, write_json};
use crate::services::{SharedConfig, open_db};
use watch_db::Db;

#[derive(Clone)]
pub struct ExportService {
    config: SharedConfig,
}

impl ExportService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Writes up to `limit` of the most recent records to `path` and returns the path.
    pub fn write_to(&self, path: &Path, format: ExportFormat, limit: u32) -> Result<PathBuf> {
        let rows = self.db()?.query_recent(limit)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        match format {
            ExportFormat::Json => write_json(writer, &rows)?,
            ExportFormat::Csv => write_csv(writer, &rows)?,
        }
        tracing::info!(path = %path.display(), rows = rows.len(), "export written");
        Ok(path.to_path_buf())
    }
}
