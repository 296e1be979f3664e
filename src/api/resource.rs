use crate::error::{DecodeError, ParseError};
use reqwest::Url;
use serde_json::Value;
use std::fmt;

type Parser<T> = Box<dyn Fn(&[u8]) -> Result<T, ParseError> + Send + Sync>;

/// A fetch target paired with the function that turns its response body into
/// a `T`. Building one performs no I/O; hand it to a `Webservice` to run it.
pub struct Resource<T> {
    url: Url,
    parse: Parser<T>,
}

impl<T: 'static> Resource<T> {
    pub fn new<F>(url: Url, parse: F) -> Self
    where
        F: Fn(&[u8]) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self {
            url,
            parse: Box::new(parse),
        }
    }

    /// A resource whose body is JSON, decoded by `decode`.
    pub fn json<F>(url: Url, decode: F) -> Self
    where
        F: Fn(&Value) -> Result<T, DecodeError> + Send + Sync + 'static,
    {
        Self::new(url, move |bytes| {
            if bytes.is_empty() {
                return Err(ParseError::Empty);
            }
            let data: Value = serde_json::from_slice(bytes)?;
            Ok(decode(&data)?)
        })
    }
}

impl Resource<Vec<u8>> {
    /// The raw body, e.g. poster image data. An empty body is a failure.
    pub fn bytes(url: Url) -> Self {
        Self::new(url, |bytes| {
            if bytes.is_empty() {
                Err(ParseError::Empty)
            } else {
                Ok(bytes.to_vec())
            }
        })
    }
}

impl<T> Resource<T> {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<T, ParseError> {
        (self.parse)(bytes)
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.url.path())
            .finish_non_exhaustive()
    }
}
