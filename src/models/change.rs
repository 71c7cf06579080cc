//! Change-related types: one record per file touched by a patch.

use serde::{Deserialize, Serialize};

/// Whether a file block carries textual or binary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    /// Textual hunks that can be scanned for licenses and copyrights.
    Source,
    /// The block contains a binary patch marker instead of text.
    Binary,
}

/// How the diff touched the file, derived from block metadata.
///
/// Marker precedence: new file > deleted file > rename > modified.
/// A block with content but no marker defaults to `Modified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ChangeKind {
    Added,
    Deleted,
    Renamed,
    Modified,
}

/// A single file's change within a patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    /// Repository-relative path (post-image side of the diff header).
    pub path: String,
    /// Source or binary.
    pub file_kind: FileKind,
    /// Added, deleted, renamed, or modified.
    pub change_kind: ChangeKind,
    /// Raw hunk text after the post-image marker; `None` for binary
    /// patches and rename-only blocks.
    pub content: Option<String>,
}

impl FileChange {
    /// Lines introduced by this change, with the `+` marker stripped.
    pub fn added_lines(&self) -> Vec<&str> {
        self.marked_lines('+')
    }

    /// Lines removed by this change, with the `-` marker stripped.
    pub fn deleted_lines(&self) -> Vec<&str> {
        self.marked_lines('-')
    }

    fn marked_lines(&self, marker: char) -> Vec<&str> {
        self.content
            .as_deref()
            .map(|c| {
                c.lines()
                    .filter_map(|l| l.strip_prefix(marker))
                    .collect()
            })
            .unwrap_or_default()
    }
}
