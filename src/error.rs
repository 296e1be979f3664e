use thiserror::Error;

/// Why a JSON object could not be turned into one of the entity models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),
}

/// Failure of a resource parser to produce a value from a response body.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty response body")]
    Empty,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected payload: {0}")]
    Decode(#[from] DecodeError),
}

/// Outcome of a failed fetch, delivered through the same channel as successes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("TMDB request failed: {0}")]
    Transport(String),
    #[error("unparseable response from {path}: {source}")]
    Unparseable {
        path: String,
        #[source]
        source: ParseError,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config store serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
