//! Strategies: where to look for versions and how to extract them

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::config::StrategyConfig;
use crate::version::error::StrategyError;
use crate::version::types::{LivecheckOverride, PackageDescriptor};

/// Name given to strategies built from a package's own livecheck rule
pub const OVERRIDE_STRATEGY_NAME: &str = "override";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_][a-z0-9_]*)\}").unwrap());

/// Rule producing one URL to fetch for a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlRule {
    /// The package's distribution URL
    Stable,
    /// The package's homepage
    Homepage,
    /// A URL with `{placeholder}` substitution
    Template(String),
}

impl UrlRule {
    pub fn parse(rule: &str) -> Self {
        match rule {
            "stable" | ":stable" | "url" => UrlRule::Stable,
            "homepage" | ":homepage" => UrlRule::Homepage,
            other => UrlRule::Template(other.to_string()),
        }
    }

    fn expand(&self, package: &PackageDescriptor, vars: &HashMap<String, String>) -> Option<String> {
        match self {
            UrlRule::Stable => package.url.clone(),
            UrlRule::Homepage => package.homepage.clone(),
            UrlRule::Template(template) => Some(substitute(template, vars, false)),
        }
    }
}

/// A named rule pairing URL selection with a version pattern
///
/// Registered strategies carry a URL predicate deciding which packages they
/// apply to. Named captures of that predicate become placeholders usable in
/// the URL rules and the version pattern.
#[derive(Debug, Clone)]
pub struct Strategy {
    name: String,
    url_match: Option<Regex>,
    urls: Vec<UrlRule>,
    regex: String,
    reject: Option<Regex>,
}

impl Strategy {
    pub fn new(
        name: &str,
        url_match: Option<&str>,
        urls: Vec<UrlRule>,
        regex: &str,
    ) -> Result<Self, StrategyError> {
        let url_match = url_match
            .map(|pattern| compile(name, pattern))
            .transpose()?;

        // Validate the template with placeholders filled in
        let probe = PLACEHOLDER_RE.replace_all(regex, "x");
        check_capture_groups(name, &compile(name, &probe)?)?;

        Ok(Self {
            name: name.to_string(),
            url_match,
            urls,
            regex: regex.to_string(),
            reject: None,
        })
    }

    /// Discard candidates that match `pattern` in full
    pub fn with_reject(mut self, pattern: &str) -> Result<Self, StrategyError> {
        self.reject = Some(compile(&self.name, &format!("^(?:{})$", pattern))?);
        Ok(self)
    }

    /// Builds an ad-hoc strategy from a package's livecheck rule
    pub fn from_override(rule: &LivecheckOverride) -> Result<Self, StrategyError> {
        let strategy = Self::new(
            OVERRIDE_STRATEGY_NAME,
            None,
            vec![UrlRule::parse(&rule.url)],
            &rule.regex,
        )?;
        match &rule.reject {
            Some(reject) => strategy.with_reject(reject),
            None => Ok(strategy),
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Result<Self, StrategyError> {
        let urls = config.urls.iter().map(|u| UrlRule::parse(u)).collect();
        let strategy = Self::new(&config.name, Some(&config.url_match), urls, &config.regex)?;
        match &config.reject {
            Some(reject) => strategy.with_reject(reject),
            None => Ok(strategy),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the URL predicate accepts any of the package's checkable URLs
    pub fn accepts(&self, package: &PackageDescriptor) -> bool {
        let Some(url_match) = &self.url_match else {
            return false;
        };
        package
            .checkable_urls()
            .into_iter()
            .any(|url| url_match.is_match(url))
    }

    /// Resolves URLs and the version pattern for a specific package
    pub fn bind(&self, package: &PackageDescriptor) -> Result<BoundStrategy, StrategyError> {
        let vars = self.variables(package);

        let urls: Vec<String> = self
            .urls
            .iter()
            .filter_map(|rule| rule.expand(package, &vars))
            .collect();
        if urls.is_empty() {
            return Err(StrategyError::MissingUrl {
                name: self.name.clone(),
                package: package.name.clone(),
            });
        }

        let pattern = compile(&self.name, &substitute(&self.regex, &vars, true))?;
        check_capture_groups(&self.name, &pattern)?;

        Ok(BoundStrategy {
            name: self.name.clone(),
            urls,
            pattern,
            reject: self.reject.clone(),
        })
    }

    /// Convenience for `bind(package)?.urls()`
    pub fn urls(&self, package: &PackageDescriptor) -> Result<Vec<String>, StrategyError> {
        Ok(self.bind(package)?.urls)
    }

    fn variables(&self, package: &PackageDescriptor) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), package.name.clone());
        if let Some(url) = &package.url {
            vars.insert("url".to_string(), url.clone());
        }
        if let Some(homepage) = &package.homepage {
            vars.insert("homepage".to_string(), homepage.clone());
        }

        let Some(url_match) = &self.url_match else {
            return vars;
        };
        let captures = package
            .checkable_urls()
            .into_iter()
            .find_map(|url| url_match.captures(url));
        if let Some(captures) = captures {
            for group in url_match.capture_names().flatten() {
                if let Some(m) = captures.name(group) {
                    vars.insert(group.to_string(), m.as_str().to_string());
                }
            }
        }
        vars
    }
}

/// A strategy resolved for one package
#[derive(Debug, Clone)]
pub struct BoundStrategy {
    name: String,
    urls: Vec<String>,
    pattern: Regex,
    reject: Option<Regex>,
}

impl BoundStrategy {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extracts raw version candidates from fetched content
    ///
    /// Returns the capture group of every match, deduplicated, in the order
    /// they appear. No match yields an empty list.
    pub fn extract(&self, content: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for captures in self.pattern.captures_iter(content) {
            if let Some(m) = captures.get(1) {
                let candidate = m.as_str();
                if !candidate.is_empty() && !candidates.iter().any(|c| c == candidate) {
                    candidates.push(candidate.to_string());
                }
            }
        }
        candidates
    }

    pub fn rejects(&self, candidate: &str) -> bool {
        self.reject
            .as_ref()
            .is_some_and(|reject| reject.is_match(candidate))
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, StrategyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|source| StrategyError::InvalidPattern {
            name: name.to_string(),
            source,
        })
}

fn check_capture_groups(name: &str, pattern: &Regex) -> Result<(), StrategyError> {
    // captures_len includes the implicit whole-match group
    let groups = pattern.captures_len() - 1;
    if groups != 1 {
        return Err(StrategyError::CaptureGroups {
            name: name.to_string(),
            found: groups,
        });
    }
    Ok(())
}

/// Replaces known `{placeholder}`s. Unknown ones, such as regex repetition
/// counts, are left alone.
fn substitute(template: &str, vars: &HashMap<String, String>, escape: bool) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures| {
            match vars.get(&caps[1]) {
                Some(value) if escape => regex::escape(value),
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
