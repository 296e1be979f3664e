//! Staleness-gated refresh of the TMDB image configuration.
//!
//! `ConfigService` always has a config to hand out: the persisted copy if one
//! was readable at startup, otherwise the built-in default. A refresh replaces
//! the whole value and writes it back to the store; a failed refresh leaves
//! everything as it was.

use crate::api::tmdb::Endpoints;
use crate::api::webservice::{Transport, Webservice};
use crate::config::store::ConfigStore;
use crate::error::FetchError;
use crate::models::ImageConfig;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The current config is within the threshold; nothing was fetched.
    Fresh,
    /// A new config was fetched, installed and persisted.
    Refreshed,
}

pub struct ConfigService {
    current: RwLock<Arc<ImageConfig>>,
    store: ConfigStore,
    // Set while a spawned refresh has not yet run its completion.
    refreshing: AtomicBool,
}

impl ConfigService {
    /// Starts from the stored config, or the default if none can be read.
    pub fn load(store: ConfigStore) -> Self {
        let config = match store.load() {
            Some(config) => {
                tracing::info!(days = ?config.days_since_last_update(), "loaded stored image config");
                config
            }
            None => {
                tracing::info!("no stored image config; using defaults");
                ImageConfig::default()
            }
        };
        Self::with_config(config, store)
    }

    pub fn with_config(config: ImageConfig, store: ConfigStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
            store,
            refreshing: AtomicBool::new(false),
        }
    }

    /// The authoritative config. Never waits on the network.
    pub fn current(&self) -> Arc<ImageConfig> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn days_since_last_update(&self) -> Option<i64> {
        self.current().days_since_last_update()
    }

    pub fn needs_refresh(&self, threshold_days: i64) -> bool {
        self.current().is_stale_at(threshold_days, Utc::now())
    }

    /// True from a successful `spawn_refresh_if_stale` until its completion
    /// has run on the main queue.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Fetches a new config if the current one is stale and installs it.
    /// On failure the current config is kept and the error returned.
    pub async fn refresh_if_stale<T: Transport>(
        &self,
        webservice: &Webservice<T>,
        endpoints: &Endpoints,
        threshold_days: i64,
    ) -> Result<RefreshOutcome, FetchError> {
        if !self.needs_refresh(threshold_days) {
            tracing::debug!(threshold_days, "image config is fresh");
            return Ok(RefreshOutcome::Fresh);
        }
        let result = webservice.fetch(ImageConfig::resource(endpoints)).await;
        match result {
            Ok(config) => {
                self.replace(config);
                Ok(RefreshOutcome::Refreshed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "image config refresh failed; keeping current config");
                Err(e)
            }
        }
    }

    /// Callback flavour of `refresh_if_stale`: the new config is installed by
    /// a completion on the main queue. Returns whether a fetch was started.
    ///
    /// The owner of the main queue must keep running it until
    /// [`is_refreshing`](Self::is_refreshing) turns false, otherwise the
    /// fetch is lost when the runtime shuts down. At most one spawned
    /// refresh is in flight.
    pub fn spawn_refresh_if_stale<T: Transport>(
        self: &Arc<Self>,
        webservice: &Webservice<T>,
        endpoints: &Endpoints,
        threshold_days: i64,
    ) -> bool {
        if !self.needs_refresh(threshold_days) {
            tracing::debug!(threshold_days, "image config is fresh");
            return false;
        }
        if self.refreshing.swap(true, Ordering::SeqCst) {
            tracing::debug!("image config refresh already in flight");
            return false;
        }
        let service = Arc::clone(self);
        webservice.load(ImageConfig::resource(endpoints), move |result| {
            match result {
                Ok(config) => service.replace(config),
                Err(e) => {
                    tracing::warn!(error = %e, "image config refresh failed; keeping current config")
                }
            }
            service.refreshing.store(false, Ordering::SeqCst);
        });
        true
    }

    fn replace(&self, config: ImageConfig) {
        let config = Arc::new(config);
        match self.current.write() {
            Ok(mut guard) => *guard = Arc::clone(&config),
            Err(poisoned) => *poisoned.into_inner() = Arc::clone(&config),
        }
        if let Err(e) = self.store.save(&config) {
            tracing::warn!(path = %self.store.path().display(), error = %e, "failed to persist image config");
        }
        tracing::info!(sizes = config.poster_sizes.len(), "image config refreshed");
    }
}
