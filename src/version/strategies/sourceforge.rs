//! SourceForge project RSS feed

use crate::version::error::StrategyError;
use crate::version::strategies::TARBALL_VERSION;
use crate::version::strategy::{Strategy, UrlRule};

pub(super) fn strategy() -> Result<Strategy, StrategyError> {
    Strategy::new(
        "sourceforge",
        Some(r"(?:downloads\.)?sourceforge\.net/projects?/(?P<project>[^/?#]+)"),
        vec![UrlRule::Template(
            "https://sourceforge.net/projects/{project}/rss".to_string(),
        )],
        &format!(r"url=.*?/{{project}}[._-]{}", TARBALL_VERSION),
    )
}
