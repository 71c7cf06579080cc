//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and policy defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "licheck";

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.licheck.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".licheck.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "licheck";

/// Declared license assumed for repositories with no `[[projects]]` entry.
pub const DEFAULT_LICENSE: &str = "BSD-3-Clause-Clear";

/// Telemetry heartbeat endpoint.
pub const TELEMETRY_URL: &str = "https://licheck.dev/v1/heartbeat";


// ── Environment variable names ──────────────────────────────────────

pub const ENV_SCANNER: &str = "LICHECK_SCANNER";
pub const ENV_TELEMETRY: &str = "LICHECK_TELEMETRY";
