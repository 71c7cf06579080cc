//! Report aggregation.
//!
//! Merges license and copyright issues per file into two disjoint
//! partitions: `flagged` (blocking) and `warned` (uncertain license
//! classifications only). A path may appear in both partitions, but each
//! issue lands in exactly one. Iteration order is insertion order, which
//! is diff order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{Category, FileIssues, Issue, Severity, Summary};
use crate::policy::uncertainty::is_uncertain_issue;
use crate::policy::LicenseFamilies;

/// The final per-run report.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Files with at least one blocking issue.
    pub flagged: IndexMap<String, FileIssues>,
    /// Files with warning-only license issues.
    pub warned: IndexMap<String, FileIssues>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty() && self.warned.is_empty()
    }

    pub fn has_blocking(&self) -> bool {
        !self.flagged.is_empty()
    }

    /// Process exit status: `0` when nothing blocks, otherwise the number
    /// of distinct files with blocking issues. Warnings never affect it.
    pub fn exit_code(&self) -> i32 {
        i32::try_from(self.flagged.len()).unwrap_or(i32::MAX)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            flagged_files: self.flagged.len(),
            warned_files: self.warned.len(),
            errors: self.flagged.values().map(FileIssues::len).sum(),
            warnings: self.warned.values().map(FileIssues::len).sum(),
        }
    }

    /// Flatten both partitions into issue records, blocking errors first,
    /// files in diff order, license issues before copyright issues.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let partitions = [
            (Severity::Error, &self.flagged),
            (Severity::Warning, &self.warned),
        ];
        for (severity, partition) in partitions {
            for (file, entry) in partition {
                for message in &entry.license_issues {
                    issues.push(Issue {
                        file: file.clone(),
                        category: Category::License,
                        severity,
                        message: message.clone(),
                    });
                }
                for message in &entry.copyright_issues {
                    issues.push(Issue {
                        file: file.clone(),
                        category: Category::Copyright,
                        severity,
                        message: message.clone(),
                    });
                }
            }
        }
        issues
    }
}

/// Merge license and copyright issue maps into a report.
///
/// License issues are split blocking-vs-warning via the uncertainty
/// classifier; copyright issues are always blocking.
pub fn aggregate(
    license_issues: IndexMap<String, Vec<String>>,
    copyright_issues: IndexMap<String, Vec<String>>,
    families: &LicenseFamilies,
) -> Report {
    let mut report = Report::default();

    for (file, issues) in license_issues {
        let (warnings, errors): (Vec<String>, Vec<String>) = issues
            .into_iter()
            .partition(|issue| is_uncertain_issue(issue, families));

        if !errors.is_empty() {
            report
                .flagged
                .entry(file.clone())
                .or_default()
                .license_issues = errors;
        }
        if !warnings.is_empty() {
            report.warned.entry(file).or_default().license_issues = warnings;
        }
    }

    for (file, issues) in copyright_issues {
        report
            .flagged
            .entry(file)
            .or_default()
            .copyright_issues = issues;
    }

    report
}
