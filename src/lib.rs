//! Upstream version checks for tracked packages
//!
//! [`version`] holds the discovery and comparison engine, [`catalog`]
//! supplies package descriptors, and [`output`] renders run reports.

pub mod catalog;
pub mod config;
pub mod output;
pub mod version;
