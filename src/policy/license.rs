//! License policy engine.
//!
//! Separates each change's hunk into added/deleted blobs, submits them to
//! the detection gateway in one batch, and derives per-file issues from the
//! detected SPDX expressions. Expression evaluation is asymmetric: an AND
//! needs every group allowed, an OR needs one member, and an expression
//! opening with a parenthesized OR-group is decided by that group alone
//! (licenses echoed later via AND come from comments and are ignored).

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::detect::{Blob, DetectError, Detector};
use crate::models::{ChangeKind, FileChange, FileKind};

use super::{expression_tokens, LicensePolicy};

/// Extensions that make a new file count as source for the
/// "no license added" rule.
const SOURCE_EXTENSIONS: &[&str] = &[
    ".c", ".cpp", ".h", ".hpp", ".java", ".py", ".js", ".ts", ".rb", ".go", ".swift", ".kt",
    ".kts", ".sh", ".rs",
];

/// Evaluates changes against a resolved allow-list.
pub struct LicenseChecker<'a> {
    policy: &'a LicensePolicy,
}

impl<'a> LicenseChecker<'a> {
    pub fn new(policy: &'a LicensePolicy) -> Self {
        Self { policy }
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

        let blobs = build_blobs(&source_changes);
        let detections = detector.detect_licenses(&blobs).await?;

        let mut flagged: IndexMap<String, Vec<String>> = IndexMap::new();
        for (idx, change) in source_changes.iter().enumerate() {
            let added = detections
                .get(&format!("{idx}_added"))
                .filter(|e| !e.is_empty());
            let deleted = detections
                .get(&format!("{idx}_deleted"))
                .filter(|e| !e.is_empty());

            let mut issues = Vec::new();

            if matches!(change.change_kind, ChangeKind::Modified | ChangeKind::Added) {
                match (added, deleted) {
                    (Some(new), Some(old)) => {
                        // A permissive replacement is allowed even if the
                        // old license differed.
                        if license_sets_differ(new, old) && !self.is_permissive(new) {
                            issues.push(format!(
                                "License deleted: {old} and license added: {new}"
                            ));
                        }
                    }
                    (Some(new), None) => {
                        if !self.is_permissive(new) {
                            issues.push(format!("Incompatible license added: {new}"));
                        }
                    }
                    (None, Some(old)) => {
                        // A bare removal with no replacement is always
                        // suspicious.
                        issues.push(format!("License deleted: {old}"));
                    }
                    (None, None) => {}
                }
            }

            if change.change_kind == ChangeKind::Added
                && added.is_none()
                && is_source_file(&change.path)
            {
                issues.push(format!(
                    "No license added for source file: {}",
                    change.path
                ));
            }

            if !issues.is_empty() {
                flagged.insert(change.path.clone(), issues);
            }
        }

        Ok(flagged)
    }

    /// Evaluate an SPDX expression against the allow-list.
    pub fn is_permissive(&self, expression: &str) -> bool {
        let expression = expression.trim();

        // Dual-license shortcut: when the expression opens with a
        // parenthesized OR-group, that group decides the whole expression.
        if expression.starts_with('(') {
            let head = expression.split(')').next().unwrap_or("");
            if head.contains(" OR ") {
                return head
                    .trim_matches(['(', ')'])
                    .split(" OR ")
                    .map(str::trim)
                    .any(|lic| self.policy.allows(lic));
            }
        }

        // Standard evaluation: every AND-group must pass; an OR-group
        // passes when any member is allowed.
        for group in expression.split(" AND ") {
            let group = group.trim();
            if group.contains(" OR ") {
                let permitted = group
                    .trim_matches(['(', ')'])
                    .split(" OR ")
                    .map(str::trim)
                    .any(|lic| self.policy.allows(lic));
                if !permitted {
                    return false;
                }
            } else if !self.policy.allows(group.trim_matches(['(', ')'])) {
                return false;
            }
        }

        true
    }
}

/// Stage added/deleted blobs for every change, named `{idx}_added` /
/// `{idx}_deleted` after the change's position among source changes.
fn build_blobs(source_changes: &[&FileChange]) -> Vec<Blob> {
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
    blobs
}

/// Compare two expressions as sets of license tokens.
fn license_sets_differ(a: &str, b: &str) -> bool {
    let set_a: BTreeSet<String> = expression_tokens(a).into_iter().collect();
    let set_b: BTreeSet<String> = expression_tokens(b).into_iter().collect();
    set_a != set_b
}

/// Extension-based source file check for the "no license added" rule.
fn is_source_file(path: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
