mod analytics;
mod export;
mod ingest;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use watch_db::Db;

pub use analytics::AnalyticsService;
pub use export::ExportService;
pub use ingest::IngestService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub ingest: IngestService,
    pub export: ExportService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            analytics: AnalyticsService::new(shared.clone()),
            ingest: IngestService::new(shared.clone()),
            export: ExportService::new(shared),
        }
    }
}

/// Opens the store and makes sure its table exists before any query runs.
fn open_db(config: &SharedConfig) -> Result<Db> {
    let db = Db::open(&config.db_path)?;
    db.initialize()?;
    Ok(db)
}
