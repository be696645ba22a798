//! Infrastructure layer - configuration and adapter wiring
//!
//! Loads [`AppConfig`] from defaults, an optional TOML file and `SKYBRIEF_*`
//! environment variables, and builds the geocoding, weather and rewriting
//! adapters from it.

pub mod config;

pub use config::{AppConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
