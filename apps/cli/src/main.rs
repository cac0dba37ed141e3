mod args;
mod config;
mod dashboard;
mod dirs;
mod logging;
mod render;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use watch_app::{
    AppPaths, AppState, ExportFormat, ensure_app_data_dir, export_file_name, export_stamp,
};
use watch_core::UsagePolicy;

use args::{Cli, Command};

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Runs store work off the async runtime.
pub(crate) async fn blocking<T, F>(task: F) -> CliResult<T>
where
    F: FnOnce() -> watch_app::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(task).await??)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "geminiwatch failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = config::load_or_create().map_err(io::Error::other)?;
    if config.created {
        tracing::info!(path = %config.paths.file.display(), "created default config");
    }
    let settings = config.config;

    let data_dir = dirs::resolve_data_dir(cli.data_dir.as_deref(), settings.data_dir.as_deref())
        .map_err(io::Error::other)?;
    let gemini_home =
        dirs::resolve_gemini_home(cli.gemini_home.as_deref(), settings.gemini_home.as_deref());
    tracing::debug!(
        data_dir = %data_dir.dir.display(),
        source = data_dir.source,
        gemini_home = %gemini_home.display(),
        "resolved paths"
    );

    let paths = AppPaths::new(data_dir.dir);
    ensure_app_data_dir(&paths)?;
    let app = AppState::new(paths.db_path.clone(), gemini_home);
    app.setup_db()?;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => {
            let recent_limit = settings.recent_limit;
            let report = blocking(move || {
                app.refresh_data()?;
                app.services.analytics.report(recent_limit)
            })
            .await?;
            print!(
                "{}",
                render::render_report(&report, &UsagePolicy::default(), VERSION, Local::now())
            );
        }
        Command::Dashboard => {
            let interval = Duration::from_secs(settings.refresh_interval_secs.max(1));
            dashboard::run(app, interval, settings.recent_limit).await?;
        }
        Command::Sync => {
            let inserted = blocking(move || app.refresh_data()).await?;
            println!("Synced {} new records.", inserted);
        }
        Command::Export {
            format,
            limit,
            output,
        } => {
            let format = ExportFormat::from(format);
            let limit = limit.unwrap_or(settings.export_limit);
            let target = output.unwrap_or_else(|| {
                paths
                    .app_data_dir
                    .join(export_file_name(&export_stamp(Local::now()), format))
            });
            let written = blocking(move || {
                app.refresh_data()?;
                app.services.export.write_to(&target, format, limit)
            })
            .await?;
            println!("Data exported to: {}", written.display());
        }
    }

    Ok(())
}
