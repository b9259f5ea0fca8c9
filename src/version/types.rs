//! Common types for package checks

use serde::{Deserialize, Serialize};

use crate::version::value::VersionValue;

/// Explicit livecheck rule attached to a package
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LivecheckOverride {
    /// URL to fetch. Accepts `{url}`, `{homepage}` and `{name}` placeholders,
    /// or the shorthands `stable` and `homepage`.
    pub url: String,
    /// Pattern with exactly one capture group around the version text
    pub regex: String,
    /// Candidates matching this pattern in full are discarded
    #[serde(default)]
    pub reject: Option<String>,
}

/// A tracked package, as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    /// Short name (e.g., "ffmpeg")
    pub name: String,
    /// Fully-qualified name including the tap (e.g., "homebrew/core/ffmpeg")
    #[serde(default)]
    pub full_name: Option<String>,
    /// Currently packaged version
    pub version: String,
    #[serde(default)]
    pub homepage: Option<String>,
    /// Primary distribution URL
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub livecheck: Option<LivecheckOverride>,
    #[serde(default)]
    pub skip: Option<SkipReason>,
}

/// Marks a package as not checkable
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SkipReason {
    #[serde(default)]
    pub message: Option<String>,
}

impl PackageDescriptor {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: None,
            version: version.to_string(),
            homepage: None,
            url: None,
            livecheck: None,
            skip: None,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_homepage(mut self, homepage: &str) -> Self {
        self.homepage = Some(homepage.to_string());
        self
    }

    pub fn with_livecheck(mut self, url: &str, regex: &str) -> Self {
        self.livecheck = Some(LivecheckOverride {
            url: url.to_string(),
            regex: regex.to_string(),
            reject: None,
        });
        self
    }

    pub fn skipped(mut self, message: Option<&str>) -> Self {
        self.skip = Some(SkipReason {
            message: message.map(|m| m.to_string()),
        });
        self
    }

    /// URLs strategies are matched against, distribution URL first
    pub fn checkable_urls(&self) -> Vec<&str> {
        [self.url.as_deref(), self.homepage.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Name to display, honoring the full-name preference
    pub fn display_name(&self, full_name: bool) -> &str {
        match (&self.full_name, full_name) {
            (Some(full), true) => full,
            _ => &self.name,
        }
    }
}

/// Where a discovered version came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionMeta {
    /// Name of the strategy that produced the candidates
    pub strategy: String,
    /// URL the winning candidate was extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Every URL that was requested
    pub urls: Vec<String>,
    /// Raw candidate strings in encounter order
    pub candidates: Vec<String>,
    /// Fetch failures of URLs that were skipped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

/// Outcome of version discovery for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub latest: Option<VersionValue>,
    pub meta: VersionMeta,
}

/// Classification of a package check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Current version matches the latest upstream version
    Ok,
    /// A newer upstream version exists
    Outdated,
    /// Current version is newer than anything published upstream
    NewerThanUpstream,
    /// Package was not checked
    Skipped,
    /// Check failed
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Outdated => "outdated",
            CheckStatus::NewerThanUpstream => "newer_than_upstream",
            CheckStatus::Skipped => "skipped",
            CheckStatus::Error => "error",
        }
    }
}

/// Final per-package result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub package: PackageDescriptor,
    pub status: CheckStatus,
    pub current: String,
    pub latest: Option<String>,
    pub messages: Vec<String>,
    pub meta: Option<VersionMeta>,
}

impl CheckResult {
    pub fn skipped(package: &PackageDescriptor, message: Option<String>) -> Self {
        Self {
            package: package.clone(),
            status: CheckStatus::Skipped,
            current: package.version.clone(),
            latest: None,
            messages: message.filter(|m| !m.is_empty()).into_iter().collect(),
            meta: None,
        }
    }

    pub fn error(package: &PackageDescriptor, message: String) -> Self {
        Self {
            package: package.clone(),
            status: CheckStatus::Error,
            current: package.version.clone(),
            latest: None,
            messages: vec![message],
            meta: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    pub fn outdated(&self) -> bool {
        self.status == CheckStatus::Outdated
    }

    pub fn newer_than_upstream(&self) -> bool {
        self.status == CheckStatus::NewerThanUpstream
    }
}
