//! Version comparison for packages

use std::cmp::Ordering;

use crate::version::types::{CheckStatus, VersionInfo};
use crate::version::value::VersionValue;

const RELEASE_SUFFIX: &str = "-release";

/// Message reported when discovery found no usable candidate
pub const UNABLE_TO_GET_VERSIONS: &str = "Unable to get versions";

/// Result of comparing the current version with the latest upstream one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub status: CheckStatus,
    /// Current version as recorded
    pub current: String,
    /// Latest version after suffix normalization
    pub latest: Option<String>,
    pub messages: Vec<String>,
}

/// Compare the current version against discovered upstream versions
///
/// An upstream `X-release` tag counts as plain `X` unless the current version
/// carries the same suffix. The suffix is stripped once.
pub fn compare(current: &str, info: &VersionInfo) -> Comparison {
    let Some(latest) = &info.latest else {
        return Comparison {
            status: CheckStatus::Error,
            current: current.to_string(),
            latest: None,
            messages: vec![UNABLE_TO_GET_VERSIONS.to_string()],
        };
    };

    let latest = strip_release_suffix(current, latest);
    let current_value = VersionValue::parse(current);

    let status = match current_value.cmp(&latest) {
        Ordering::Less => CheckStatus::Outdated,
        Ordering::Greater => CheckStatus::NewerThanUpstream,
        Ordering::Equal => CheckStatus::Ok,
    };

    Comparison {
        status,
        current: current.to_string(),
        latest: Some(latest.raw().to_string()),
        messages: Vec::new(),
    }
}

fn strip_release_suffix(current: &str, latest: &VersionValue) -> VersionValue {
    match latest.raw().strip_suffix(RELEASE_SUFFIX) {
        Some(stripped) if !current.ends_with(RELEASE_SUFFIX) => VersionValue::parse(stripped),
        _ => latest.clone(),
    }
}
