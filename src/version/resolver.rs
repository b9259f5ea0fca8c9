//! Latest version resolution
//!
//! Picks the strategy for a package, fetches every URL it names, extracts
//! candidate versions and returns the greatest one along with where it came
//! from.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::version::error::{CheckError, FetchError};
use crate::version::fetcher::Fetcher;
use crate::version::registry::StrategyRegistry;
use crate::version::types::{PackageDescriptor, VersionInfo, VersionMeta};
use crate::version::value::VersionValue;

pub struct VersionResolver {
    registry: Arc<StrategyRegistry>,
    fetcher: Arc<dyn Fetcher>,
}

impl VersionResolver {
    pub fn new(registry: Arc<StrategyRegistry>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { registry, fetcher }
    }

    /// Discovers the latest upstream version of a package
    ///
    /// URLs are fetched in order. A failed URL is skipped and noted in
    /// `meta.failures`; only when every URL fails is the whole resolution an
    /// error. Finding no candidates is not an error and yields `latest: None`.
    pub async fn resolve(&self, package: &PackageDescriptor) -> Result<VersionInfo, CheckError> {
        let resolution = self.registry.resolve(package)?;
        let strategy = resolution.strategy().bind(package)?;
        debug!(
            "Using strategy {} for {} ({} URL(s))",
            strategy.name(),
            package.name,
            strategy.urls().len()
        );

        let mut failures: Vec<FetchError> = Vec::new();
        // (raw candidate, URL it came from)
        let mut candidates: Vec<(String, String)> = Vec::new();

        for url in strategy.urls() {
            let content = match self.fetcher.fetch(url).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Failed to fetch {} for {}: {}", url, package.name, e);
                    failures.push(e);
                    continue;
                }
            };

            let extracted = strategy.extract(&content);
            debug!("Found {} candidate(s) at {}", extracted.len(), url);
            for candidate in extracted {
                if !candidates.iter().any(|(c, _)| *c == candidate) {
                    candidates.push((candidate, url.clone()));
                }
            }
        }

        if failures.len() == strategy.urls().len() {
            return Err(CheckError::Fetch {
                url_count: failures.len(),
                failures,
            });
        }

        let latest = candidates
            .iter()
            .filter(|(raw, _)| {
                let rejected = strategy.rejects(raw);
                if rejected {
                    debug!("Rejected candidate {} for {}", raw, package.name);
                }
                !rejected
            })
            .map(|(raw, url)| (VersionValue::parse(raw), url))
            .fold(None, |best: Option<(VersionValue, &String)>, (value, url)| match best {
                // Strictly greater only, so the first of equal versions wins
                Some((best_value, best_url)) if value <= best_value => Some((best_value, best_url)),
                _ => Some((value, url)),
            });

        let meta = VersionMeta {
            strategy: strategy.name().to_string(),
            url: latest.as_ref().map(|(_, url)| (*url).clone()),
            urls: strategy.urls().to_vec(),
            candidates: candidates.iter().map(|(raw, _)| raw.clone()).collect(),
            failures: failures.iter().map(|f| f.to_string()).collect(),
        };

        Ok(VersionInfo {
            latest: latest.map(|(value, _)| value),
            meta,
        })
    }
}
