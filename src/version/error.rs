use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Strategy already registered: {0}")]
    Duplicate(String),

    #[error("No strategy matches {0}")]
    NoStrategy(String),

    #[error("Invalid pattern for strategy {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern for strategy {name} must have exactly one capture group, found {found}")]
    CaptureGroups { name: String, found: usize },

    #[error("Strategy {name} produced no URL to check for {package}")]
    MissingUrl { name: String, package: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Timed out fetching {0}")]
    Timeout(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Network error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if e.is_timeout() {
            FetchError::Timeout(url)
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Failure of a single package check
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error("Unable to fetch any of {url_count} URL(s): {}", join_failures(.failures))]
    Fetch {
        url_count: usize,
        failures: Vec<FetchError>,
    },

    #[error("Check aborted: {0}")]
    Panicked(String),
}

fn join_failures(failures: &[FetchError]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("No available package with the name \"{0}\"")]
    UnknownPackage(String),

    #[error("Package {name} is listed more than once in {path}")]
    DuplicatePackage { name: String, path: String },

    #[error(transparent)]
    Strategy(#[from] StrategyError),
}
