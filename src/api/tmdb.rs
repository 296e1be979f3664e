use reqwest::Url;

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Builds TMDB request URLs. Every URL carries the static `api_key`, the
/// configured `language` if any, then the endpoint's own parameters.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    api_key: String,
    language: Option<String>,
}

impl Endpoints {
    pub fn new(api_key: impl Into<String>, language: Option<String>) -> Self {
        let base = Url::parse(BASE_URL).expect("TMDB base URL is a valid absolute URL");
        Self::with_base(base, api_key, language)
    }

    /// Points the endpoints at another host, e.g. a local mirror.
    pub fn with_base(base: Url, api_key: impl Into<String>, language: Option<String>) -> Self {
        Self {
            base,
            api_key: api_key.into(),
            language,
        }
    }

    /// `path` is appended to the API base path, e.g. "/movie/upcoming".
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        let full_path = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&full_path);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            if let Some(language) = &self.language {
                query.append_pair("language", language);
            }
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }
}
