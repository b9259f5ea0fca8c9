//! Directory containing the distribution tarball

use crate::version::error::StrategyError;
use crate::version::strategies::TARBALL_VERSION;
use crate::version::strategy::{Strategy, UrlRule};

pub(super) fn strategy() -> Result<Strategy, StrategyError> {
    Strategy::new(
        "directory_listing",
        Some(
            r"^(?P<dir>https?://.+/)(?P<project>[a-z0-9_+]+(?:-[a-z][a-z0-9_+]*)*)-v?\d+(?:\.\d+)+\.(?:tar\.[a-z0-9]+|tgz|tbz2?|txz|zip)$",
        ),
        vec![UrlRule::Template("{dir}".to_string())],
        &format!(r"href=.*?{{project}}[._-]{}", TARBALL_VERSION),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::types::PackageDescriptor;
    use rstest::rstest;

    #[rstest]
    #[case(
        "https://secure.nic.cz/files/knot-dns/knot-2.9.5.tar.xz",
        "https://secure.nic.cz/files/knot-dns/"
    )]
    #[case(
        "https://download.savannah.gnu.org/releases/lzip/lzlib/lzlib-1.11.tar.gz",
        "https://download.savannah.gnu.org/releases/lzip/lzlib/"
    )]
    #[case(
        "https://gnupg.org/ftp/gcrypt/gnupg/gnupg-1.4.23.tar.bz2",
        "https://gnupg.org/ftp/gcrypt/gnupg/"
    )]
    fn lists_parent_directory(#[case] url: &str, #[case] expected: &str) {
        let package = PackageDescriptor::new("pkg", "1.0").with_url(url);

        let bound = strategy().unwrap().bind(&package).unwrap();

        assert_eq!(bound.urls(), [expected]);
    }

    #[test]
    fn ignores_urls_without_versioned_archive() {
        let package =
            PackageDescriptor::new("ffmpeg", "4.3").with_homepage("https://ffmpeg.org/");

        assert!(!strategy().unwrap().accepts(&package));
    }

    #[test]
    fn pattern_uses_archive_base_name() {
        let package = PackageDescriptor::new("knot", "2.9.5")
            .with_url("https://secure.nic.cz/files/knot-dns/knot-2.9.5.tar.xz");
        let bound = strategy().unwrap().bind(&package).unwrap();
        let listing = r#"
            <a href="knot-2.9.5.tar.xz">knot-2.9.5.tar.xz</a>
            <a href="knot-3.0.0.tar.xz">knot-3.0.0.tar.xz</a>
            <a href="knot-resolver-5.1.3.tar.xz">knot-resolver-5.1.3.tar.xz</a>
        "#;

        assert_eq!(bound.extract(listing), vec!["2.9.5", "3.0.0"]);
    }
}
