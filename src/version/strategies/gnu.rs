//! GNU FTP directory listing

use crate::version::error::StrategyError;
use crate::version::strategies::TARBALL_VERSION;
use crate::version::strategy::{Strategy, UrlRule};

pub(super) fn strategy() -> Result<Strategy, StrategyError> {
    Strategy::new(
        "gnu",
        Some(r"(?:(?:ftp|ftpmirror)\.gnu\.org/gnu|www\.gnu\.org/software)/(?P<project>[^/?#]+)"),
        vec![UrlRule::Template(
            "https://ftp.gnu.org/gnu/{project}/".to_string(),
        )],
        &format!(r"href=.*?{{project}}-{}", TARBALL_VERSION),
    )
}
