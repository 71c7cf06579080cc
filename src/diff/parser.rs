//! Unified diff parser.
//!
//! A line state machine over `git diff` output: each `diff --git` header
//! opens a file block, metadata lines classify the change, and everything
//! after the post-image (`+++`) marker is the block's hunk content. Excluded
//! paths are dropped before a [`FileChange`] is materialized.

use crate::models::{ChangeKind, FileChange, FileKind};

use super::Exclusions;

/// Per-block parse state, reset at every `diff --git` header.
#[derive(Default)]
struct BlockState {
    is_new: bool,
    is_deleted: bool,
    rename_from: bool,
    rename_to: bool,
    is_binary: bool,
    content: Option<String>,
}

impl BlockState {
    /// Classify the change kind with marker precedence
    /// new > deleted > rename > default-modified.
    fn change_kind(&self) -> ChangeKind {
        if self.is_new {
            ChangeKind::Added
        } else if self.is_deleted {
            ChangeKind::Deleted
        } else if self.rename_from && self.rename_to {
            ChangeKind::Renamed
        } else {
            ChangeKind::Modified
        }
    }

    fn into_change(self, path: String) -> FileChange {
        let change_kind = self.change_kind();
        let (file_kind, content) = if self.is_binary {
            (FileKind::Binary, None)
        } else {
            (FileKind::Source, self.content)
        };
        FileChange {
            path,
            file_kind,
            change_kind,
            content,
        }
    }
}

/// Parse a raw unified diff into an ordered sequence of file changes.
///
/// A diff with zero file blocks yields an empty vec. Excluded paths never
/// appear in the output.
pub fn parse_patch(input: &str, exclusions: &Exclusions) -> Vec<FileChange> {
    let mut changes: Vec<FileChange> = Vec::new();
    let mut lines = input.lines().peekable();

    while let Some(line) = lines.next() {
        if !line.starts_with("diff --git ") {
            continue;
        }
        let Some(path) = post_image_path(line) else {
            continue;
        };

        let mut state = BlockState::default();

        while let Some(&next) = lines.peek() {
            if next.starts_with("diff --git ") {
                break;
            }
            let line = lines.next().unwrap_or_default();

            match &mut state.content {
                // Content phase: collect raw hunk text verbatim.
                Some(content) => {
                    content.push_str(line);
                    content.push('\n');
                }
                // Metadata phase: classify the block.
                None => {
                    if line.starts_with("new file mode") {
                        state.is_new = true;
                    } else if line.starts_with("deleted file mode") {
                        state.is_deleted = true;
                    } else if line.starts_with("rename from ") {
                        state.rename_from = true;
                    } else if line.starts_with("rename to ") {
                        state.rename_to = true;
                    } else if line.starts_with("GIT binary patch")
                        || line.contains("Binary files")
                    {
                        state.is_binary = true;
                    } else if line.starts_with("+++ ") {
                        state.content = Some(String::new());
                    }
                }
            }
        }

        if !exclusions.is_excluded(&path) {
            changes.push(state.into_change(path));
        }
    }

    changes
}

/// Extract the post-image path from a `diff --git a/old b/new` header.
///
/// The `b/` side is taken from the last ` b/` separator, which matches how
/// git itself renders headers for paths containing spaces.
fn post_image_path(header: &str) -> Option<String> {
    let rest = header.strip_prefix("diff --git ")?;
    if let Some(pos) = rest.rfind(" b/") {
        let path = &rest[pos + 3..];
        if !path.is_empty() {
            return Some(path.to_string());
        }
    }
    // Fallback for non-standard prefixes: take the final whitespace token
    // and strip a single-character prefix if present.
    let last = rest.split_whitespace().last()?;
    let stripped = match last.as_bytes() {
        [_, b'/', ..] => &last[2..],
        _ => last,
    };
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
