use std::path::PathBuf;

pub fn default_gemini_home() -> PathBuf {
    if let Ok(path) = std::env::var("GEMINI_HOME") {
        return PathBuf::from(path);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gemini");
    }
    PathBuf::from(".gemini")
}
