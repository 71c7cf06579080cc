//! Copyright policy engine.
//!
//! The lighter sibling of the license engine: one batched copyright scan
//! over the same added/deleted blobs, flagging notices that a modification
//! removes or alters. Every copyright issue is blocking.

use indexmap::IndexMap;

use crate::detect::{Blob, DetectError, Detector};
use crate::models::{ChangeKind, FileChange, FileKind};

/// Flags removed or altered copyright notices.
#[derive(Default)]
pub struct CopyrightChecker;

impl CopyrightChecker {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all changes and return `path -> issue messages`, in diff
    /// order. Files without issues do not appear.
    pub async fn run(
        &self,
        changes: &[FileChange],
        detector: &dyn Detector,
    ) -> Result<IndexMap<String, Vec<String>>, DetectError> {
        let source_changes: Vec<&FileChange> = changes
            .iter()
            .filter(|c| c.file_kind == FileKind::Source)
            .collect();

        let mut blobs = Vec::new();
        for (idx, change) in source_changes.iter().enumerate() {
            let added = change.added_lines();
            if !added.is_empty() {
                blobs.push(Blob::new(format!("{idx}_added"), added.join("\n")));
            }
            let deleted = change.deleted_lines();
            if !deleted.is_empty() {
                blobs.push(Blob::new(format!("{idx}_deleted"), deleted.join("\n")));
            }
        }

        let detections = detector.detect_copyrights(&blobs).await?;

        let mut flagged: IndexMap<String, Vec<String>> = IndexMap::new();
        for (idx, change) in source_changes.iter().enumerate() {
            if change.change_kind != ChangeKind::Modified {
                continue;
            }

            let added = detections
                .get(&format!("{idx}_added"))
                .cloned()
                .unwrap_or_default();
            let deleted = detections
                .get(&format!("{idx}_deleted"))
                .cloned()
                .unwrap_or_default();

            // Holders that the modification dropped. Lines that merely
            // moved show up on both sides and cancel out here.
            let removed: Vec<&String> = deleted
                .iter()
                .filter(|d| !added.iter().any(|a| a.eq_ignore_ascii_case(d)))
                .collect();

            if removed.is_empty() {
                continue;
            }

            let message = if added.is_empty() {
                format!("Copyright deleted: {}", join(&removed))
            } else {
                format!(
                    "Copyright modified: {} changed to {}",
                    join(&deleted.iter().collect::<Vec<_>>()),
                    join(&added.iter().collect::<Vec<_>>()),
                )
            };
            flagged
                .entry(change.path.clone())
                .or_default()
                .push(message);
        }

        Ok(flagged)
    }
}

fn join(holders: &[&String]) -> String {
    holders
        .iter()
        .map(|h| h.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
