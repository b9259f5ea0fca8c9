//! PyPI project page

use crate::version::error::StrategyError;
use crate::version::strategies::TARBALL_VERSION;
use crate::version::strategy::{Strategy, UrlRule};

pub(super) fn strategy() -> Result<Strategy, StrategyError> {
    Strategy::new(
        "pypi",
        Some(r"files\.pythonhosted\.org/packages/(?:[^/]+/)*(?P<project>[^/]+?)-v?\d[^/]*$"),
        vec![UrlRule::Template(
            "https://pypi.org/project/{project}/".to_string(),
        )],
        &format!(r"{{project}}[._-]{}", TARBALL_VERSION),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::types::PackageDescriptor;

    #[test]
    fn project_page_derived_from_sdist_url() {
        let package = PackageDescriptor::new("python-six", "1.15.0").with_url(
            "https://files.pythonhosted.org/packages/6b/34/415834bfdafca3c5f451532e8a8d9ba89a21c9743a0c59fbd0205c7f9426/six-1.15.0.tar.gz",
        );

        let bound = strategy().unwrap().bind(&package).unwrap();

        assert_eq!(bound.urls(), ["https://pypi.org/project/six/"]);
        assert_eq!(
            bound.extract(r#"<a href="/six-1.16.0.tar.gz">six-1.16.0.tar.gz</a>"#),
            vec!["1.16.0"]
        );
    }
}
