use crate::models::Movie;

type SelectHook = Box<dyn Fn(&Movie) + Send>;

/// Rows of the upcoming-movies screen and its "movie selected" hook.
pub struct MovieList {
    movies: Vec<Movie>,
    on_select: SelectHook,
}

impl MovieList {
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            on_select: Box::new(|_| {}),
        }
    }

    pub fn set_movies(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
    }

    pub fn row_count(&self) -> usize {
        self.movies.len()
    }

    pub fn movie_at(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Replaces the selection hook.
    pub fn on_select(&mut self, hook: impl Fn(&Movie) + Send + 'static) {
        self.on_select = Box::new(hook);
    }

    /// Notifies the hook about the movie at `row`, if there is one.
    pub fn select(&self, row: usize) -> Option<&Movie> {
        let movie = self.movies.get(row)?;
        (self.on_select)(movie);
        Some(movie)
    }
}

impl Default for MovieList {
    fn default() -> Self {
        Self::new()
    }
}
