//! Version discovery and comparison
//!
//! This module finds the latest upstream version of each package and
//! compares it with the packaged one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Runner    │────▶│  Resolver   │────▶│  Registry   │
//! │ (aggregate) │     │ (discover)  │     │ (strategy)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Checker   │     │   Fetcher   │
//! │  (compare)  │     │   (HTTP)    │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Comparison of current and latest versions
//! - [`error`]: Error types for strategies, fetches, checks and loading
//! - [`fetcher`]: Fetcher trait for retrieving remote content
//! - [`fetchers`]: Concrete fetcher implementations
//! - [`registry`]: Ordered strategy registry and resolution
//! - [`resolver`]: Latest version discovery for one package
//! - [`runner`]: Concurrent checks over a package collection
//! - [`strategies`]: Built-in strategies
//! - [`strategy`]: URL rules and version extraction
//! - [`types`]: Package descriptors and results
//! - [`value`]: Comparable version values

pub mod checker;
pub mod error;
pub mod fetcher;
pub mod fetchers;
pub mod registry;
pub mod resolver;
pub mod runner;
pub mod strategies;
pub mod strategy;
pub mod types;
pub mod value;
