//! Configuration module
//!
//! This module handles application configuration loading and validation

pub mod settings;
pub mod validation;

pub use settings::{AuthConfig, DatabaseConfig, FeaturesConfig, LoggingConfig, Settings, StorageConfig};
