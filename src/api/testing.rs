use crate::api::webservice::Transport;
use crate::error::FetchError;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// In-memory transport keyed by URL path. Unknown paths fail like a refused
/// connection.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, Result<Vec<u8>, String>>,
    hits: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(mut self, path: &str, body: &str) -> Self {
        self.routes.insert(path.to_string(), Ok(body.as_bytes().to_vec()));
        self
    }

    pub(crate) fn with_failure(mut self, path: &str, message: &str) -> Self {
        self.routes.insert(path.to_string(), Err(message.to_string()));
        self
    }

    /// Holds every response until `gate` hands out a permit for it.
    pub(crate) fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        match self.routes.get(url.path()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(FetchError::Transport(message.clone())),
            None => Err(FetchError::Transport(format!("no route for {}", url.path()))),
        }
    }
}

pub(crate) const CONFIGURATION_BODY: &str = r#"{
    "images": {
        "base_url": "http://image.example.org/t/p/",
        "secure_base_url": "https://image.example.org/t/p/",
        "poster_sizes": ["w92", "w500", "original"]
    },
    "change_keys": ["adult"]
}"#;
