//! Configuration library for the xstrack engine.
//!
//! Centralizes defaults, TOML file loading and `XSTRACK_*` environment
//! overrides so embedders and tests share one set of validation rules.

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigError, ConfigLoad, ConfigLoader};
pub use models::{ConfigSource, EngineConfig, URL_PLACEHOLDER};
