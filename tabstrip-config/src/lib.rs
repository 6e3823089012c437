//! Configuration system for the tabstrip tab manager.
//!
//! This crate provides configuration loading, saving, validation and
//! default values for tab strip behaviour (history depth, analytics,
//! replace-in-place opens, navigation wraparound).

mod config;
pub mod defaults;
mod error;

pub use config::TabsConfig;
pub use error::ConfigError;
