use crate::error::StoreError;
use crate::models::AppSettings;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Loads `settings.json` from `data_dir`, writing the defaults there on first
/// run. A file that no longer parses is replaced by defaults in memory only.
pub fn load_settings(data_dir: &Path) -> Result<(AppSettings, PathBuf), StoreError> {
    let settings_path = data_dir.join(SETTINGS_FILE_NAME);
    if settings_path.exists() {
        let data = std::fs::read_to_string(&settings_path)?;
        let settings: AppSettings = serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!(path = %settings_path.display(), error = %e, "unreadable settings; using defaults");
            AppSettings::default()
        });
        Ok((settings, settings_path))
    } else {
        let settings = AppSettings::default();
        std::fs::create_dir_all(data_dir)?;
        save_settings(&settings, &settings_path)?;
        Ok((settings, settings_path))
    }
}

pub fn save_settings(settings: &AppSettings, settings_path: &Path) -> Result<(), StoreError> {
    let data = serde_json::to_string_pretty(settings)?;
    std::fs::write(settings_path, data)?;
    Ok(())
}

/// `UPCOMING_MOVIES_DATA_DIR` if set, otherwise `data/` beside the executable.
pub fn data_dir() -> std::io::Result<PathBuf> {
    if let Some(dir) = std::env::var_os("UPCOMING_MOVIES_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let exe_path = std::env::current_exe()?;
    let exe_dir = exe_path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "executable has no parent directory")
    })?;
    Ok(exe_dir.join("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let (settings, path) = load_settings(&data_dir).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_settings_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let (mut settings, path) = load_settings(dir.path()).unwrap();
        settings.tmdb_api_key = "abc123".into();
        settings.language = Some("de-DE".into());
        save_settings(&settings, &path).unwrap();

        let (reloaded, _) = load_settings(dir.path()).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn garbage_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE_NAME), "[1, 2").unwrap();
        let (settings, _) = load_settings(dir.path()).unwrap();
        assert_eq!(settings, AppSettings::default());
    }
}
