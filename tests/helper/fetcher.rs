//! Fetcher test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use livecheck::version::error::FetchError;
use livecheck::version::fetcher::Fetcher;

/// Fetcher serving canned responses and recording requested URLs
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Result<String, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_failure(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(response) => response.clone(),
            None => Err(FetchError::NotFound(url.to_string())),
        }
    }
}
