use std::io::{self, Write};
use std::time::Duration;

use chrono::Local;
use watch_app::AppState;
use watch_core::UsagePolicy;

use crate::render::render_report;
use crate::{CliResult, VERSION, blocking};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Re-syncs and redraws the report every `interval` until Ctrl+C.
pub async fn run(app: AppState, interval: Duration, recent_limit: u32) -> CliResult<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let policy = UsagePolicy::default();

    loop {
        let state = app.clone();
        let refresh = blocking(move || {
            state.refresh_data()?;
            state.services.analytics.report(recent_limit)
        });
        let report = tokio::select! {
            _ = &mut shutdown => break,
            report = refresh => report?,
        };

        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", CLEAR_SCREEN)?;
        write!(stdout, "{}", render_report(&report, &policy, VERSION, Local::now()))?;
        writeln!(
            stdout,
            "\nRefreshing every {}s... (Ctrl+C to stop)",
            interval.as_secs()
        )?;
        stdout.flush()?;
        drop(stdout);

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    println!("\nExiting dashboard.");
    Ok(())
}
