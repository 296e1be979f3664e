use crate::api::resource::Resource;
use crate::api::tmdb::Endpoints;
use crate::error::DecodeError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    pub fn from_json(json: &Value) -> Result<Self, DecodeError> {
        Ok(Self {
            id: super::int(json, "id")?,
            name: super::string(json, "name")?,
        })
    }

    /// The full movie genre reference list.
    pub fn all(endpoints: &Endpoints) -> Resource<Vec<Genre>> {
        Resource::json(endpoints.url("/genre/movie/list", &[]), |data| {
            Ok(super::array(data, "genres")?
                .iter()
                .filter_map(|g| Genre::from_json(g).ok())
                .collect())
        })
    }
}
