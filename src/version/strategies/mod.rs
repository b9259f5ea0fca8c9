//! Built-in strategies keyed on well-known hosting sites
//!
//! Order matters: the first strategy accepting a package wins, so the
//! generic directory listing strategy comes last.

mod directory_listing;
mod github_releases;
mod gnu;
mod pypi;
mod sourceforge;

use crate::version::error::StrategyError;
use crate::version::strategy::Strategy;

/// Version pattern shared by the built-in strategies: a dotted number,
/// optionally `v`-prefixed, directly followed by a `.t` archive extension
pub(crate) const TARBALL_VERSION: &str = r"v?(\d+(?:\.\d+)+)\.t";

/// Returns the built-in strategies in registration order
pub fn builtin() -> Result<Vec<Strategy>, StrategyError> {
    Ok(vec![
        github_releases::strategy()?,
        sourceforge::strategy()?,
        gnu::strategy()?,
        pypi::strategy()?,
        directory_listing::strategy()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_strategies_have_unique_names() {
        let strategies = builtin().unwrap();
        let mut names: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
        names.sort();
        names.dedup();

        assert_eq!(names.len(), strategies.len());
    }
}
