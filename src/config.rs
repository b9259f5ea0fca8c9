use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::LoadError;

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for a single fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Number of packages checked at the same time
pub const DEFAULT_CONCURRENCY: usize = 8;

/// User agent sent with every request
pub const USER_AGENT: &str = "livecheck";

/// Environment variable overriding the watchlist location
pub const WATCHLIST_ENV: &str = "LIVECHECK_WATCHLIST";

/// Livecheck configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LivecheckConfig {
    /// Number of packages checked concurrently
    pub concurrency: usize,
    /// Per-request timeout in milliseconds
    pub fetch_timeout_ms: u64,
    pub user_agent: String,
    /// Additional strategies, registered after the built-in ones
    pub strategies: Vec<StrategyConfig>,
}

impl Default for LivecheckConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            user_agent: USER_AGENT.to_string(),
            strategies: Vec::new(),
        }
    }
}

impl LivecheckConfig {
    /// Loads configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Strategy declared as data
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub name: String,
    /// Pattern over a package's distribution URL or homepage; named groups
    /// become placeholders
    pub url_match: String,
    /// URL rules: `stable`, `homepage`, or a template with placeholders
    pub urls: Vec<String>,
    /// Version pattern with exactly one capture group
    pub regex: String,
    #[serde(default)]
    pub reject: Option<String>,
}

/// Returns the path of the watchlist file.
/// Uses $LIVECHECK_WATCHLIST if set,
/// otherwise falls back to ~/.livecheck_watchlist,
/// or ./.livecheck_watchlist if no home directory is available.
pub fn watchlist_path() -> PathBuf {
    watchlist_path_with_env(std::env::var(WATCHLIST_ENV).ok(), dirs::home_dir())
}

fn watchlist_path_with_env(env_path: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    env_path
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            home_dir
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".livecheck_watchlist")
        })
}
