use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use watch_app::ExportFormat;

/// Monitor Gemini CLI usage
#[derive(Parser, Debug)]
#[command(name = "geminiwatch", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Gemini CLI home directory (defaults to $GEMINI_HOME or ~/.gemini)
    #[arg(long, global = true)]
    pub gemini_home: Option<PathBuf>,

    /// Directory holding the usage database and exports
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show current usage report
    Status,
    /// Start live monitoring dashboard
    Dashboard,
    /// Force sync from Gemini session files
    Sync,
    /// Export data
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Maximum number of records to export (most recent first)
        #[arg(long)]
        limit: Option<u32>,
        /// Write to this file instead of the data directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}
