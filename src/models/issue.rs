//! Issue types representing compliance findings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Uncertain classification — surfaced but does not affect the exit code.
    Warning,
    /// Blocking violation that fails the check.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// Which policy engine produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    License,
    Copyright,
}

/// A single finding attached to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The file path relative to the repo root.
    pub file: String,
    /// License or copyright.
    pub category: Category,
    /// Blocking error or non-blocking warning.
    pub severity: Severity,
    /// Human-readable description of the before/after state.
    pub message: String,
}

/// Per-file issue lists, split by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileIssues {
    pub license_issues: Vec<String>,
    pub copyright_issues: Vec<String>,
}

impl FileIssues {
    pub fn is_empty(&self) -> bool {
        self.license_issues.is_empty() && self.copyright_issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.license_issues.len() + self.copyright_issues.len()
    }
}

/// Summary statistics for a check run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub flagged_files: usize,
    pub warned_files: usize,
    pub errors: usize,
    pub warnings: usize,
}
