//! Watchlist file: package names to check when none are given
//!
//! Lines starting with `#` are comments. Every other line may hold several
//! whitespace-separated names.

use std::path::Path;

use tracing::debug;

use crate::version::error::LoadError;

pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace())
        .map(|name| name.to_string())
        .collect()
}

/// Reads the watchlist, or `None` when the file does not exist
pub fn read(path: &Path) -> Result<Option<Vec<String>>, LoadError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let names = parse(&content);
            debug!("Read {} name(s) from watchlist {}", names.len(), path.display());
            Ok(Some(names))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
