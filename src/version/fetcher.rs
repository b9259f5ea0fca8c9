//! Fetcher trait for retrieving remote content

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;

/// Trait for fetching the text behind a URL
///
/// Implementations bound every request by a timeout and report it as
/// `FetchError::Timeout`. A single attempt is made per call.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the body of `url` as text
    ///
    /// # Returns
    /// * `Ok(String)` - Response body
    /// * `Err(FetchError)` - Timeout, missing resource, bad status or transport failure
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
