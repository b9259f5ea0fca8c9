//! Registry of named strategies

use indexmap::IndexMap;
use tracing::debug;

use crate::version::error::StrategyError;
use crate::version::strategies;
use crate::version::strategy::Strategy;
use crate::version::types::PackageDescriptor;

/// Strategy chosen for a package
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// A strategy from the registry
    Registered(&'a Strategy),
    /// Built from the package's own livecheck rule
    Override(Strategy),
}

impl Resolution<'_> {
    pub fn strategy(&self) -> &Strategy {
        match self {
            Resolution::Registered(strategy) => strategy,
            Resolution::Override(strategy) => strategy,
        }
    }
}

/// Ordered collection of uniquely named strategies
///
/// Registration order is preserved and decides which strategy wins when
/// several accept the same package. The registry is filled before a run and
/// only read afterwards.
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: IndexMap<String, Strategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in strategies
    pub fn with_builtin() -> Result<Self, StrategyError> {
        let mut registry = Self::new();
        for strategy in strategies::builtin()? {
            registry.register(strategy)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, strategy: Strategy) -> Result<(), StrategyError> {
        if self.strategies.contains_key(strategy.name()) {
            return Err(StrategyError::Duplicate(strategy.name().to_string()));
        }
        debug!("Registered strategy {}", strategy.name());
        self.strategies.insert(strategy.name().to_string(), strategy);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Picks the strategy for a package
    ///
    /// A package's own livecheck rule takes precedence. Otherwise the first
    /// registered strategy accepting one of its URLs is used.
    pub fn resolve(&self, package: &PackageDescriptor) -> Result<Resolution<'_>, StrategyError> {
        if let Some(rule) = &package.livecheck {
            return Ok(Resolution::Override(Strategy::from_override(rule)?));
        }

        self.strategies
            .values()
            .find(|strategy| strategy.accepts(package))
            .map(Resolution::Registered)
            .ok_or_else(|| StrategyError::NoStrategy(package.name.clone()))
    }
}
