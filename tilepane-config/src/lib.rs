//! Configuration system for the tilepane layout engine.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - Pane geometry (divider gap and hit width)
//! - Memory-tier sweep thresholds
//! - Session persistence settings
//! - Log level

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
