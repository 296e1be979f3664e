use crate::api::resource::Resource;
use crate::api::tmdb::Endpoints;
use crate::error::DecodeError;
use crate::models::Genre;
use serde_json::Value;

/// One entry of a TMDB movie list.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    /// Free-form, exactly as TMDB sends it.
    pub release_date: String,
    pub genre_ids: Vec<i64>,
    pub vote_average: f64,
    pub poster_path: Option<String>,
}

impl Movie {
    /// Decodes a movie object. Every field except `poster_path` is required;
    /// the first missing or mistyped one fails the whole record.
    pub fn from_json(json: &Value) -> Result<Self, DecodeError> {
        Ok(Self {
            id: super::int(json, "id")?,
            title: super::string(json, "title")?,
            overview: super::string(json, "overview")?,
            release_date: super::string(json, "release_date")?,
            genre_ids: super::int_array(json, "genre_ids")?,
            vote_average: super::float(json, "vote_average")?,
            poster_path: super::optional_string(json, "poster_path"),
        })
    }

    /// The upcoming-movies list. Entries that fail to decode are dropped;
    /// a payload without a `results` array fails as a whole.
    pub fn upcoming(endpoints: &Endpoints) -> Resource<Vec<Movie>> {
        Resource::json(endpoints.url("/movie/upcoming", &[]), parse_movie_results)
    }

    /// Names of the reference genres this movie is tagged with, in the order
    /// of the reference list.
    pub fn genre_names(&self, genres: &[Genre]) -> Vec<String> {
        genres
            .iter()
            .filter(|g| self.genre_ids.contains(&g.id))
            .map(|g| g.name.clone())
            .collect()
    }
}

fn parse_movie_results(data: &Value) -> Result<Vec<Movie>, DecodeError> {
    let results = super::array(data, "results")?;
    Ok(results
        .iter()
        .filter_map(|r| match Movie::from_json(r) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::debug!(error = %e, id = ?r.get("id"), "skipping undecodable movie");
                None
            }
        })
        .collect())
}
