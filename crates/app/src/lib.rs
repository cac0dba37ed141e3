pub mod app;
pub mod error;
pub mod export;
pub mod report;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use error::{AppError, Result};
pub use export::{CSV_HEADER, ExportFormat, ExportRow, export_file_name, write_csv, write_json};
pub use report::{ModelQuota, UsageReport, compute_model_stats, compute_stats};
pub use services::AppServices;
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{export_stamp, utc_today};
