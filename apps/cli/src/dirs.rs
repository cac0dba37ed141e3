use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "geminiwatch";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub source: &'static str,
}

/// Picks the data directory: `--data-dir`, then `GEMINIWATCH_DATA_DIR`, then the
/// config file, then the platform data directory.
pub fn resolve_data_dir(
    flag: Option<&Path>,
    configured: Option<&Path>,
) -> Result<DataDirResolution, String> {
    if let Some(dir) = flag {
        return Ok(DataDirResolution {
            dir: dir.to_path_buf(),
            source: "flag",
        });
    }
    if let Ok(dir) = std::env::var("GEMINIWATCH_DATA_DIR") {
        return Ok(DataDirResolution {
            dir: PathBuf::from(dir),
            source: "env",
        });
    }
    if let Some(dir) = configured {
        return Ok(DataDirResolution {
            dir: dir.to_path_buf(),
            source: "config",
        });
    }
    let base =
        dirs::data_dir().ok_or_else(|| "resolve data dir: no home directory".to_string())?;
    Ok(DataDirResolution {
        dir: base.join(DATA_DIR_NAME),
        source: "default",
    })
}

/// Picks the Gemini home: `--gemini-home`, then the config file, then `$GEMINI_HOME`/`~/.gemini`.
pub fn resolve_gemini_home(flag: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    flag.or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(ingest::default_gemini_home)
}
