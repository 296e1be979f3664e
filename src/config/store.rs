use crate::error::StoreError;
use crate::models::ImageConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "TheMovieDB-Configuration.json";

/// Persisted copy of the image configuration: one JSON file, read back whole
/// or not at all.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing, unreadable or corrupt file all mean "nothing stored".
    pub fn load(&self) -> Option<ImageConfig> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no stored image config");
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "ignoring corrupt image config");
                None
            }
        }
    }

    pub fn save(&self, config: &ImageConfig) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn saved_config_reloads_equal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        let config = ImageConfig {
            base_url: "http://img.example/".into(),
            secure_base_url: "https://img.example/".into(),
            poster_sizes: vec!["w185".into(), "original".into()],
            date_updated: Some(Utc::now()),
        };

        store.save(&config).unwrap();
        assert_eq!(store.load(), Some(config));
    }

    #[test]
    fn save_overwrites_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        store.save(&ImageConfig::default()).unwrap();

        let newer = ImageConfig {
            date_updated: Some(Utc::now()),
            ..ImageConfig::default()
        };
        store.save(&newer).unwrap();
        assert_eq!(store.load(), Some(newer));
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ConfigStore::in_dir(dir.path()).load(), None);
    }

    #[test]
    fn corrupt_or_partial_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::in_dir(dir.path());

        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), None);

        std::fs::write(store.path(), r#"{"base_url":"http://img.example/"}"#).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_creates_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::in_dir(&dir.path().join("nested").join("data"));
        store.save(&ImageConfig::default()).unwrap();
        assert!(store.path().exists());
    }
}
