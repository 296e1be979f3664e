use crate::api::main_queue::MainHandle;
use crate::api::resource::Resource;
use crate::error::FetchError;
use reqwest::{Client, Url};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Performs the GET for a resource and returns the raw body.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the shared client. Fails when the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("upcoming-movies/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        // Error statuses still carry a JSON body; let the parser judge it.
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(path = url.path(), %status, "TMDB returned an error status");
        }

        let bytes = resp.bytes().await.map_err(|e| {
            FetchError::Transport(format!("failed to read response body: {}", e.without_url()))
        })?;
        Ok(bytes.to_vec())
    }
}

/// Runs resources against a `Transport`.
///
/// `fetch` hands the result to the awaiting task. `load` runs the fetch on
/// the runtime and delivers the result to a completion on the main queue.
pub struct Webservice<T: Transport = HttpTransport> {
    transport: Arc<T>,
    runtime: Handle,
    main: MainHandle,
}

impl<T: Transport> Clone for Webservice<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            runtime: self.runtime.clone(),
            main: self.main.clone(),
        }
    }
}

impl<T: Transport> Webservice<T> {
    pub fn new(transport: T, runtime: Handle, main: MainHandle) -> Self {
        Self {
            transport: Arc::new(transport),
            runtime,
            main,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch<R>(&self, resource: Resource<R>) -> Result<R, FetchError> {
        fetch_with(self.transport.as_ref(), resource).await
    }

    /// Loads a resource. `completion` is called exactly once, always on the
    /// main queue, never on the thread that received the response.
    pub fn load<R, F>(&self, resource: Resource<R>, completion: F)
    where
        R: Send + 'static,
        F: FnOnce(Result<R, FetchError>) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let main = self.main.clone();
        self.runtime.spawn(async move {
            let path = resource.url().path().to_string();
            let result = fetch_with(transport.as_ref(), resource).await;
            if main.queue(move || completion(result)).is_err() {
                tracing::warn!(%path, "main queue closed; dropping result");
            }
        });
    }
}

async fn fetch_with<T: Transport, R>(transport: &T, resource: Resource<R>) -> Result<R, FetchError> {
    let path = resource.url().path().to_string();
    tracing::debug!(%path, "loading resource");

    let body = transport.get(resource.url()).await.map_err(|e| {
        tracing::warn!(%path, error = %e, "request failed");
        e
    })?;

    resource.parse(&body).map_err(|source| {
        tracing::warn!(%path, error = %source, "response did not parse");
        FetchError::Unparseable { path, source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::main_queue::MainQueue;
    use crate::api::testing::FakeTransport;
    use crate::api::tmdb::Endpoints;
    use crate::error::ParseError;
    use crate::models::Movie;
    use std::sync::Mutex;
    use std::thread::ThreadId;

    fn never_parses(url: Url) -> Resource<()> {
        Resource::new(url, |_| Err(ParseError::Empty))
    }

    #[test]
    fn http_transport_builds_its_client() {
        assert!(HttpTransport::new().is_ok());
    }

    #[tokio::test]
    async fn failing_parser_never_yields_success() {
        let endpoints = Endpoints::new("k", None);
        let ok_url = endpoints.url("/movie/upcoming", &[]);
        let down_url = endpoints.url("/configuration", &[]);
        let transport = FakeTransport::new()
            .with_body("/3/movie/upcoming", r#"{"results":[]}"#)
            .with_failure("/3/configuration", "connection refused");
        let queue = MainQueue::new();
        let service = Webservice::new(transport, Handle::current(), queue.handle());

        let parsed = service.fetch(never_parses(ok_url)).await;
        assert!(matches!(parsed, Err(FetchError::Unparseable { .. })));

        let transport_down = service.fetch(never_parses(down_url)).await;
        assert!(matches!(transport_down, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn api_error_body_is_handed_to_the_parser() {
        let endpoints = Endpoints::new("k", None);
        let transport = FakeTransport::new()
            .with_body("/3/movie/upcoming", r#"{"status_code":7,"status_message":"Invalid API key"}"#);
        let queue = MainQueue::new();
        let service = Webservice::new(transport, Handle::current(), queue.handle());

        let result = service.fetch(Movie::upcoming(&endpoints)).await;
        match result {
            Err(FetchError::Unparseable { path, .. }) => assert_eq!(path, "/3/movie/upcoming"),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn load_completes_on_the_main_queue_thread() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let endpoints = Endpoints::new("k", None);
        let transport = FakeTransport::new().with_body(
            "/3/movie/upcoming",
            r#"{"results":[{"id":1,"title":"Arrival","overview":"","release_date":"2016-11-10","genre_ids":[18],"vote_average":6.9}]}"#,
        );
        let mut queue = MainQueue::new();
        let service = Webservice::new(transport, runtime.handle().clone(), queue.handle());

        let outcome: Arc<Mutex<Option<(ThreadId, usize)>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&outcome);
        service.load(Movie::upcoming(&endpoints), move |result| {
            let count = result.map(|movies| movies.len()).unwrap_or(0);
            *slot.lock().unwrap() = Some((std::thread::current().id(), count));
        });

        queue.run_until(|| outcome.lock().unwrap().is_some());
        let (thread, count) = outcome.lock().unwrap().take().unwrap();
        assert_eq!(thread, std::thread::current().id());
        assert_eq!(count, 1);
    }

    #[test]
    fn load_reports_failure_exactly_once() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let endpoints = Endpoints::new("k", None);
        let transport = FakeTransport::new();
        let mut queue = MainQueue::new();
        let service = Webservice::new(transport, runtime.handle().clone(), queue.handle());

        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        service.load(never_parses(endpoints.url("/movie/upcoming", &[])), move |result| {
            sink.lock().unwrap().push(result.is_err());
        });

        queue.run_next();
        assert_eq!(queue.drain(), 0);
        assert_eq!(*calls.lock().unwrap(), vec![true]);
    }
}
