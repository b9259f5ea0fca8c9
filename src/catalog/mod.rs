//! Package catalog: where package descriptors come from
//!
//! The engine only needs an ordered list of [`PackageDescriptor`]s. This
//! module provides a TOML-backed catalog, the bundled per-package livecheck
//! rules, and watchlist parsing for the command-line front end.

pub mod watchlist;

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::version::error::LoadError;
use crate::version::types::{LivecheckOverride, PackageDescriptor, SkipReason};

/// Bundled livecheck rules keyed by package name
const LIVECHECKABLES: &str = include_str!("livecheckables.toml");

/// Skip message for packages distributed as GitHub Gists
pub const GIST_SKIP_MESSAGE: &str = "Stable URL is a GitHub Gist";

/// Which packages to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every package in the catalog
    All,
    /// Packages by name or full name, in the given order
    Named(Vec<String>),
}

/// Source of package descriptors
pub trait PackageCatalog {
    fn resolve_packages(&self, selector: &Selector) -> Result<Vec<PackageDescriptor>, LoadError>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    package: Vec<PackageDescriptor>,
}

/// Catalog loaded from a TOML file of `[[package]]` tables
#[derive(Debug, Default)]
pub struct FileCatalog {
    packages: IndexMap<String, PackageDescriptor>,
}

impl FileCatalog {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses catalog content; `origin` names the source in error messages
    pub fn parse(content: &str, origin: &str) -> Result<Self, LoadError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| LoadError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        let rules = bundled_livecheckables()?;

        let mut packages = IndexMap::new();
        for mut package in file.package {
            if package.livecheck.is_none() {
                package.livecheck = rules.get(&package.name).cloned();
            }
            if package.skip.is_none() && is_gist(&package) {
                package.skip = Some(SkipReason {
                    message: Some(GIST_SKIP_MESSAGE.to_string()),
                });
            }
            if packages.contains_key(&package.name) {
                return Err(LoadError::DuplicatePackage {
                    name: package.name,
                    path: origin.to_string(),
                });
            }
            packages.insert(package.name.clone(), package);
        }
        debug!("Loaded {} package(s) from {}", packages.len(), origin);

        Ok(Self { packages })
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    fn find(&self, name: &str) -> Option<&PackageDescriptor> {
        self.packages.get(name).or_else(|| {
            self.packages
                .values()
                .find(|p| p.full_name.as_deref() == Some(name))
        })
    }
}

impl PackageCatalog for FileCatalog {
    fn resolve_packages(&self, selector: &Selector) -> Result<Vec<PackageDescriptor>, LoadError> {
        match selector {
            Selector::All => Ok(self.packages.values().cloned().collect()),
            Selector::Named(names) => names
                .iter()
                .map(|name| {
                    self.find(name)
                        .cloned()
                        .ok_or_else(|| LoadError::UnknownPackage(name.clone()))
                })
                .collect(),
        }
    }
}

/// Returns the bundled per-package livecheck rules
pub fn bundled_livecheckables() -> Result<IndexMap<String, LivecheckOverride>, LoadError> {
    toml::from_str(LIVECHECKABLES).map_err(|e| LoadError::Parse {
        path: "livecheckables.toml".to_string(),
        message: e.to_string(),
    })
}

fn is_gist(package: &PackageDescriptor) -> bool {
    package
        .url
        .as_deref()
        .is_some_and(|url| url.contains("gist.github.com"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::strategy::Strategy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
        [[package]]
        name = "w3m"
        version = "0.5.3"
        homepage = "https://w3m.sourceforge.io/"

        [[package]]
        name = "knot"
        full_name = "homebrew/core/knot"
        version = "2.9.5"
        url = "https://secure.nic.cz/files/knot-dns/knot-2.9.5.tar.xz"
        livecheck = { url = "https://www.knot-dns.cz/download/", regex = 'knot-(\d+(?:\.\d+)+)\.t' }

        [[package]]
        name = "gisty"
        version = "1.0"
        url = "https://gist.github.com/someone/0123456789abcdef/archive/1.0.tar.gz"

        [[package]]
        name = "wget"
        version = "1.20.3"
        url = "https://ftp.gnu.org/gnu/wget/wget-1.20.3.tar.gz"
        skip = { message = "Checked elsewhere" }
    "#;

    #[test]
    fn bundled_livecheckables_compile_into_strategies() {
        let rules = bundled_livecheckables().unwrap();

        assert_eq!(rules.len(), 10);
        for (name, rule) in &rules {
            assert!(
                Strategy::from_override(rule).is_ok(),
                "rule for {} does not compile",
                name
            );
        }
        assert_eq!(rules["minidjvu"].reject.as_deref(), Some(r"0\.33.*"));
    }

    #[test]
    fn parse_applies_bundled_rules_without_replacing_own_rules() {
        let catalog = FileCatalog::parse(CATALOG, "test").unwrap();
        let packages = catalog.resolve_packages(&Selector::All).unwrap();

        assert_eq!(
            packages[0].livecheck.as_ref().map(|l| l.url.as_str()),
            Some("https://sourceforge.net/projects/w3m/rss")
        );
        assert_eq!(
            packages[1].livecheck.as_ref().map(|l| l.url.as_str()),
            Some("https://www.knot-dns.cz/download/")
        );
    }

    #[test]
    fn parse_marks_gists_as_skipped() {
        let catalog = FileCatalog::parse(CATALOG, "test").unwrap();
        let packages = catalog
            .resolve_packages(&Selector::Named(vec!["gisty".to_string(), "wget".to_string()]))
            .unwrap();

        assert_eq!(
            packages[0].skip.as_ref().and_then(|s| s.message.as_deref()),
            Some(GIST_SKIP_MESSAGE)
        );
        assert_eq!(
            packages[1].skip.as_ref().and_then(|s| s.message.as_deref()),
            Some("Checked elsewhere")
        );
    }

    #[test]
    fn resolve_packages_finds_full_names_and_keeps_requested_order() {
        let catalog = FileCatalog::parse(CATALOG, "test").unwrap();

        let packages = catalog
            .resolve_packages(&Selector::Named(vec![
                "homebrew/core/knot".to_string(),
                "w3m".to_string(),
            ]))
            .unwrap();

        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["knot", "w3m"]);
    }

    #[test]
    fn resolve_packages_rejects_unknown_name() {
        let catalog = FileCatalog::parse(CATALOG, "test").unwrap();

        let result = catalog.resolve_packages(&Selector::Named(vec!["nope".to_string()]));

        assert!(matches!(result, Err(LoadError::UnknownPackage(name)) if name == "nope"));
    }

    #[test]
    fn parse_rejects_repeated_package_names() {
        let content = r#"
            [[package]]
            name = "yaf"
            version = "2.11.0"

            [[package]]
            name = "yaf"
            version = "2.12.0"
        "#;

        let result = FileCatalog::parse(content, "catalog.toml");

        assert!(matches!(
            result,
            Err(LoadError::DuplicatePackage { name, path }) if name == "yaf" && path == "catalog.toml"
        ));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[package]]\nname = \"missing-version\"").unwrap();

        let result = FileCatalog::load(file.path());

        match result {
            Err(LoadError::Parse { path, .. }) => {
                assert_eq!(path, file.path().display().to_string())
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
