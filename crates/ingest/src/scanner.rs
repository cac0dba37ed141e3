use std::path::PathBuf;

use glob::{Pattern, glob};

/// Session logs relative to the Gemini home directory.
pub const SESSION_GLOB: &str = "tmp/*/chats/session-*.json";

/// Finds Gemini CLI session logs under a home directory.
#[derive(Debug, Clone)]
pub struct SessionScanner {
    home: PathBuf,
}

impl SessionScanner {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Returns every file matching the session glob. A missing tree yields an empty list.
    pub fn discover(&self) -> Vec<PathBuf> {
        let pattern = format!(
            "{}/{}",
            Pattern::escape(&self.home.to_string_lossy()),
            SESSION_GLOB
        );
        let entries = match glob(&pattern) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(pattern = %pattern, error = %err, "invalid session glob");
                return Vec::new();
            }
        };
        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(
                        path = %err.path().display(),
                        error = %err,
                        "unreadable glob entry"
                    );
                }
            }
        }
        paths.sort();
        paths
    }
}
