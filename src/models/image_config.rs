use crate::api::resource::Resource;
use crate::api::tmdb::Endpoints;
use crate::error::DecodeError;
use crate::models::Movie;
use chrono::{DateTime, Duration, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values used until the first successful configuration fetch.
const DEFAULT_BASE_URL: &str = "http://image.tmdb.org/t/p/";
const DEFAULT_SECURE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
const DEFAULT_POSTER_SIZES: [&str; 7] = ["w92", "w154", "w185", "w342", "w500", "w780", "original"];

/// Image settings from the TMDB configuration endpoint, used to build poster
/// URLs. `date_updated` is `None` for the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    pub base_url: String,
    pub secure_base_url: String,
    pub poster_sizes: Vec<String>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            secure_base_url: DEFAULT_SECURE_BASE_URL.into(),
            poster_sizes: DEFAULT_POSTER_SIZES.iter().map(|s| s.to_string()).collect(),
            date_updated: None,
        }
    }
}

impl ImageConfig {
    /// Decodes the `images` section of a configuration payload, stamping the
    /// result with `fetched_at`.
    pub fn from_json(json: &Value, fetched_at: DateTime<Utc>) -> Result<Self, DecodeError> {
        let images = json.get("images").ok_or(DecodeError::MissingField("images"))?;
        if !images.is_object() {
            return Err(DecodeError::WrongType("images"));
        }
        Ok(Self {
            base_url: super::string(images, "base_url")?,
            secure_base_url: super::string(images, "secure_base_url")?,
            poster_sizes: super::string_array(images, "poster_sizes")?,
            date_updated: Some(fetched_at),
        })
    }

    pub fn resource(endpoints: &Endpoints) -> Resource<ImageConfig> {
        Resource::json(endpoints.url("/configuration", &[]), |data| {
            ImageConfig::from_json(data, Utc::now())
        })
    }

    pub fn days_since_last_update(&self) -> Option<i64> {
        self.days_since_last_update_at(Utc::now())
    }

    /// Whole days between the last update and `now`, truncated toward zero.
    pub fn days_since_last_update_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.date_updated.map(|updated| (now - updated).num_days())
    }

    /// Stale once more than `threshold_days` have elapsed since the last
    /// update. Never-fetched configs are always stale; a threshold too large
    /// to represent as a duration never expires a dated config.
    pub fn is_stale_at(&self, threshold_days: i64, now: DateTime<Utc>) -> bool {
        let Some(updated) = self.date_updated else {
            return true;
        };
        match Duration::try_days(threshold_days) {
            Some(threshold) => now - updated > threshold,
            None => false,
        }
    }

    /// `secure_base_url` + size + poster path, or `None` when the movie has
    /// no artwork.
    pub fn poster_image_url(&self, movie: &Movie, size: &str) -> Option<Url> {
        let path = movie.poster_path.as_deref()?;
        Url::parse(&format!("{}{}{}", self.secure_base_url, size, path)).ok()
    }
}
