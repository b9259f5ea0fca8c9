//! GitHub releases page

use crate::version::error::StrategyError;
use crate::version::strategy::{Strategy, UrlRule};

pub(super) fn strategy() -> Result<Strategy, StrategyError> {
    Strategy::new(
        "github_releases",
        Some(r"^https?://github\.com/(?P<owner>[^/]+)/(?P<repo>[^/#?]+?)(?:\.git)?(?:[/#?]|$)"),
        vec![UrlRule::Template(
            "https://github.com/{owner}/{repo}/releases".to_string(),
        )],
        r#"href=["']?[^"' >]*?/releases/tag/v?(\d+(?:\.\d+)+)["' >]"#,
    )
}
