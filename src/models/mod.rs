//! Shared types used across all modules.
//!
//! This module defines the core data structures for file changes, issues,
//! and report summaries. Other modules import from here rather than
//! reaching into each other's internals.

pub mod change;
pub mod issue;

pub use change::{ChangeKind, FileChange, FileKind};
pub use issue::{Category, FileIssues, Issue, Severity, Summary};
