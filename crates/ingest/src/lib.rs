mod parser;
mod paths;
mod pipeline;
mod scanner;
mod types;

pub use parser::{parse_session_file, parse_session_str};
pub use paths::default_gemini_home;
pub use pipeline::sync_gemini_home;
pub use scanner::{SESSION_GLOB, SessionScanner};
pub use types::{IngestError, IngestIssue, ParseFailure, Result, SyncStats};
