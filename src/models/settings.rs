use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub tmdb_api_key: String,
    /// Sent as TMDB's `language` parameter when set, e.g. "en-US".
    #[serde(default)]
    pub language: Option<String>,
    /// Days after which the cached image configuration is refetched.
    #[serde(default = "default_config_max_age_days")]
    pub config_max_age_days: i64,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
}

fn default_config_max_age_days() -> i64 {
    7
}

fn default_poster_size() -> String {
    "w500".into()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            language: None,
            config_max_age_days: default_config_max_age_days(),
            poster_size: default_poster_size(),
        }
    }
}

impl AppSettings {
    /// Replaces the stored API key with `TMDB_API_KEY` when that is set.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var("TMDB_API_KEY").ok())
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.tmdb_api_key = key;
        }
        self
    }
}
