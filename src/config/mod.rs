//! Configuration: policy lookup tables, exclusions, scanner settings.

pub mod loader;

pub use loader::{Config, ConfigError, DetectorConfig, ExclusionsConfig, ProjectConfig, TelemetryConfig};
