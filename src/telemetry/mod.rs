//! Anonymous usage telemetry — privacy-respecting heartbeat.
//!
//! Sends a single fire-and-forget POST on each `check` run containing only
//! aggregate, non-identifying statistics: file count, issue counts, and
//! whether the run is inside CI.
//!
//! The heartbeat:
//! - contains **no** personally identifiable information (no paths, no
//!   repository identifiers, no license expressions)
//! - is disabled with `--no-telemetry`, `LICHECK_TELEMETRY=false`, or
//!   `[telemetry] enabled = false` in config
//! - fails silently — never affects the check outcome

use serde::Serialize;
use std::time::Duration;

use crate::env::Env;

/// Placeholder endpoint — not operational yet.
const HEARTBEAT_URL: &str = crate::constants::TELEMETRY_URL;

/// Maximum time we'll wait for the heartbeat POST before giving up.
const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(2);

/// Payload sent with each heartbeat. Contains only anonymous aggregate data.
#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatPayload {
    /// Random identifier for this single run (not persisted across runs).
    pub run_id: String,
    /// Number of file changes evaluated.
    pub file_count: usize,
    /// Total number of changed lines (added + deleted) across all files.
    pub diff_lines: usize,
    /// Whether the run appears to be inside a CI environment.
    pub is_ci: bool,
    /// CLI version string.
    pub version: &'static str,
}

impl HeartbeatPayload {
    /// Build a payload from the available check parameters.
    pub fn from_check(file_count: usize, diff_lines: usize) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            file_count,
            diff_lines,
            is_ci: detect_ci(&Env::real()),
            version: crate::constants::VERSION,
        }
    }
}

/// Detect whether we are running inside a CI environment by checking
/// common environment variables set by popular CI providers.
pub fn detect_ci(env: &Env) -> bool {
    // Generic
    if env.is_set("CI") {
        return true;
    }
    // Provider-specific variables (for systems that don't set `CI`)
    const CI_VARS: &[&str] = &[
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BITBUCKET_BUILD_NUMBER",
        "JENKINS_URL",
        "CIRCLECI",
        "TF_BUILD", // Azure Pipelines
        "BUILDKITE",
        "TRAVIS",
        "CODEBUILD_BUILD_ID", // AWS CodeBuild
        "TEAMCITY_VERSION",
    ];
    CI_VARS.iter().any(|v| env.is_set(v))
}

/// Send the heartbeat in a background task. Never blocks the check and
/// never reports failure.
pub fn send_heartbeat(payload: HeartbeatPayload) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let client = match reqwest::Client::builder()
            .timeout(HEARTBEAT_TIMEOUT)
            .build()
        {
            Ok(c) => c,
            Err(_) => return,
        };

        let _ = client.post(HEARTBEAT_URL).json(&payload).send().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_version_and_counts() {
        let payload = HeartbeatPayload::from_check(7, 42);
        assert_eq!(payload.file_count, 7);
        assert_eq!(payload.diff_lines, 42);
        assert_eq!(payload.version, crate::constants::VERSION);
        assert!(!payload.run_id.is_empty());
    }

    #[test]
    fn run_ids_are_unique_per_payload() {
        let a = HeartbeatPayload::from_check(0, 0);
        let b = HeartbeatPayload::from_check(0, 0);
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn detect_ci_generic_variable() {
        let env = Env::mock([("CI", "true")]);
        assert!(detect_ci(&env));
    }

    #[test]
    fn detect_ci_provider_variable() {
        let env = Env::mock([("GITHUB_ACTIONS", "true")]);
        assert!(detect_ci(&env));
    }

    #[test]
    fn detect_ci_negative() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert!(!detect_ci(&env));
    }

    #[test]
    fn payload_serializes() {
        let payload = HeartbeatPayload::from_check(1, 0);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["file_count"], 1);
        assert!(json.get("run_id").is_some());
    }
}
