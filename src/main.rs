use anyhow::{bail, Context, Result};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::EnvFilter;
use upcoming_movies::api::{Endpoints, HttpTransport, MainQueue, Resource, Webservice};
use upcoming_movies::config::{manager, ConfigService, ConfigStore};
use upcoming_movies::error::FetchError;
use upcoming_movies::list_model::MovieList;
use upcoming_movies::models::{Genre, ImageConfig, Movie};
use upcoming_movies::Tmdb;

/// Slot filled by a completion running on the main queue.
struct Pending<T>(Arc<Mutex<Option<T>>>);

impl<T: Send + 'static> Pending<T> {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }

    fn filler(&self) -> impl FnOnce(T) + Send + 'static {
        let slot = Arc::clone(&self.0);
        move |value| *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value)
    }

    fn is_ready(&self) -> bool {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn take(&self) -> Option<T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// Issues `resource` and keeps the main queue running until its completion
/// has been delivered.
fn load_on_main<T: Send + 'static>(
    tmdb: &Tmdb,
    main_queue: &mut MainQueue,
    resource: Resource<T>,
) -> Option<Result<T, FetchError>> {
    let pending: Pending<Result<T, FetchError>> = Pending::new();
    tmdb.webservice().load(resource, pending.filler());
    main_queue.run_until(|| pending.is_ready());
    pending.take()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = manager::data_dir().context("Failed to locate data directory")?;
    let (settings, settings_path) =
        manager::load_settings(&data_dir).context("Failed to load settings")?;
    let settings = settings.with_env_overrides();
    if settings.tmdb_api_key.is_empty() {
        bail!(
            "TMDB API key not set. Export TMDB_API_KEY or edit {}",
            settings_path.display()
        );
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut main_queue = MainQueue::new();
    let transport = HttpTransport::new().context("Failed to set up HTTP transport")?;
    let webservice = Webservice::new(transport, runtime.handle().clone(), main_queue.handle());
    let config = Arc::new(ConfigService::load(ConfigStore::in_dir(&data_dir)));
    let endpoints = Endpoints::new(settings.tmdb_api_key.clone(), settings.language.clone());
    let tmdb = Tmdb::new(webservice, config, endpoints);

    tmdb.refresh_config_if_stale(settings.config_max_age_days);

    let mut list = MovieList::new();
    match load_on_main(&tmdb, &mut main_queue, tmdb.upcoming()) {
        Some(Ok(movies)) => list.set_movies(movies),
        Some(Err(e)) => tracing::error!(error = %e, "failed to load upcoming movies"),
        None => {}
    }

    if list.row_count() == 0 {
        println!("No upcoming movies.");
        tmdb.wait_for_config_refresh(&mut main_queue);
        return Ok(());
    }

    println!("Upcoming movies:");
    for (row, movie) in list.movies().iter().enumerate() {
        println!("{:>3}. {} ({})", row + 1, movie.title, movie.release_date);
    }

    list.on_select(|movie| tracing::info!(id = movie.id, title = %movie.title, "movie selected"));
    if let Some(movie) = list.select(0).cloned() {
        let genres = match load_on_main(&tmdb, &mut main_queue, tmdb.genres()) {
            Some(Ok(genres)) => genres,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to load genres");
                Vec::new()
            }
            None => Vec::new(),
        };
        print_detail(&movie, &genres, &tmdb.current_config(), &settings.poster_size);

        if let Some(poster) = tmdb.poster(&movie, &settings.poster_size) {
            match load_on_main(&tmdb, &mut main_queue, poster) {
                Some(Ok(bytes)) => println!("  Poster:   {} bytes downloaded", bytes.len()),
                Some(Err(e)) => tracing::warn!(error = %e, "failed to download poster"),
                None => {}
            }
        }
    }

    // The runtime goes away with `main`; let a pending refresh land first.
    tmdb.wait_for_config_refresh(&mut main_queue);
    Ok(())
}

fn print_detail(movie: &Movie, genres: &[Genre], config: &ImageConfig, poster_size: &str) {
    println!();
    println!("{}", movie.title);
    println!("  Released: {}", movie.release_date);
    println!("  Rating:   {}", movie.vote_average);
    println!("  Genres:   {}", movie.genre_names(genres).join(", "));
    match config.poster_image_url(movie, poster_size) {
        Some(url) => println!("  Artwork:  {}", url),
        None => println!("  Artwork:  none"),
    }
    println!();
    println!("{}", movie.overview);
}
