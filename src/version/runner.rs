//! Runs checks over a collection of packages

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::stream::{self, StreamExt};
use tracing::{error, info};

use crate::config::DEFAULT_CONCURRENCY;
use crate::version::checker::compare;
use crate::version::error::CheckError;
use crate::version::fetcher::Fetcher;
use crate::version::registry::StrategyRegistry;
use crate::version::resolver::VersionResolver;
use crate::version::types::{CheckResult, CheckStatus, PackageDescriptor};

/// Results of one run, sorted by package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub results: Vec<CheckResult>,
    /// True when at least one package ended in `error`
    pub had_failures: bool,
}

pub struct LivecheckRunner {
    resolver: VersionResolver,
    concurrency: usize,
}

impl LivecheckRunner {
    pub fn new(registry: Arc<StrategyRegistry>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            resolver: VersionResolver::new(registry, fetcher),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets how many packages are checked at the same time (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Checks every package and returns one result per package
    ///
    /// Checks run concurrently and independently; a failing package becomes
    /// an `error` result without affecting the others. Output order is by
    /// package name regardless of completion order.
    pub async fn run(&self, packages: Vec<PackageDescriptor>) -> RunReport {
        let mut results: Vec<CheckResult> = stream::iter(packages)
            .map(|package| async move {
                AssertUnwindSafe(self.check(&package))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        let message = panic_message(panic.as_ref());
                        error!("Check for {} panicked: {}", package.name, message);
                        CheckResult::error(&package, CheckError::Panicked(message).to_string())
                    })
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        results.sort_by(|a, b| a.package.name.cmp(&b.package.name));
        let had_failures = results.iter().any(|r| r.status == CheckStatus::Error);

        RunReport {
            results,
            had_failures,
        }
    }

    /// Checks a single package
    pub async fn check(&self, package: &PackageDescriptor) -> CheckResult {
        if let Some(skip) = &package.skip {
            info!("Skipping {}", package.name);
            return CheckResult::skipped(package, skip.message.clone());
        }

        let info = match self.resolver.resolve(package).await {
            Ok(info) => info,
            Err(e) => {
                error!("Failed to check {}: {}", package.name, e);
                return CheckResult::error(package, e.to_string());
            }
        };

        let comparison = compare(&package.version, &info);
        info!(
            "{}: {} ==> {} ({})",
            package.name,
            comparison.current,
            comparison.latest.as_deref().unwrap_or("-"),
            comparison.status.as_str()
        );

        CheckResult {
            package: package.clone(),
            status: comparison.status,
            current: comparison.current,
            latest: comparison.latest,
            messages: comparison.messages,
            meta: Some(info.meta),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
