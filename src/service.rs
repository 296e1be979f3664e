use crate::api::main_queue::MainQueue;
use crate::api::resource::Resource;
use crate::api::tmdb::Endpoints;
use crate::api::webservice::{HttpTransport, Transport, Webservice};
use crate::config::{ConfigService, RefreshOutcome};
use crate::error::FetchError;
use crate::models::{Genre, ImageConfig, Movie};
use std::sync::Arc;

/// Everything a screen needs to talk to TMDB, constructed once at startup and
/// passed to whoever needs it.
pub struct Tmdb<T: Transport = HttpTransport> {
    webservice: Webservice<T>,
    config: Arc<ConfigService>,
    endpoints: Endpoints,
}

impl<T: Transport> Tmdb<T> {
    pub fn new(webservice: Webservice<T>, config: Arc<ConfigService>, endpoints: Endpoints) -> Self {
        Self {
            webservice,
            config,
            endpoints,
        }
    }

    pub fn webservice(&self) -> &Webservice<T> {
        &self.webservice
    }

    pub fn config(&self) -> &Arc<ConfigService> {
        &self.config
    }

    pub fn current_config(&self) -> Arc<ImageConfig> {
        self.config.current()
    }

    pub fn upcoming(&self) -> Resource<Vec<Movie>> {
        Movie::upcoming(&self.endpoints)
    }

    pub fn genres(&self) -> Resource<Vec<Genre>> {
        Genre::all(&self.endpoints)
    }

    /// Poster bytes for `movie` at `size`, resolved against the current
    /// config. `None` when the movie has no artwork.
    pub fn poster(&self, movie: &Movie, size: &str) -> Option<Resource<Vec<u8>>> {
        self.current_config()
            .poster_image_url(movie, size)
            .map(Resource::bytes)
    }

    /// Starts a background config refresh if the current one is older than
    /// `threshold_days`. The result is applied on the main queue; call
    /// `wait_for_config_refresh` before shutting the runtime down.
    pub fn refresh_config_if_stale(&self, threshold_days: i64) -> bool {
        self.config
            .spawn_refresh_if_stale(&self.webservice, &self.endpoints, threshold_days)
    }

    /// Runs `main_queue` until a refresh started by `refresh_config_if_stale`
    /// has been applied or has failed. Returns at once when none is pending.
    pub fn wait_for_config_refresh(&self, main_queue: &mut MainQueue) {
        main_queue.run_until(|| !self.config.is_refreshing());
    }

    pub async fn refresh_config(&self, threshold_days: i64) -> Result<RefreshOutcome, FetchError> {
        self.config
            .refresh_if_stale(&self.webservice, &self.endpoints, threshold_days)
            .await
    }
}
