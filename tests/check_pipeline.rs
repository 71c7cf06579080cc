//! End-to-end pipeline tests over the library API: parse a unified diff,
//! evaluate it with a mock detector, aggregate, and check the exit status.

use std::collections::HashMap;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use licheck::detect::{Blob, DetectError, Detector};
use licheck::diff::{parse_patch, Exclusions};
use licheck::policy::{CopyrightChecker, LicenseChecker, LicenseFamilies, LicensePolicy};
use licheck::report::{aggregate, Report};

/// Detector double returning fixed detection maps without any subprocess.
#[derive(Default)]
struct MockDetector {
    licenses: HashMap<String, String>,
    copyrights: HashMap<String, Vec<String>>,
    fail: bool,
}

impl MockDetector {
    fn with_licenses(entries: &[(&str, &str)]) -> Self {
        Self {
            licenses: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Detector for MockDetector {
    async fn detect_licenses(
        &self,
        _blobs: &[Blob],
    ) -> Result<HashMap<String, String>, DetectError> {
        if self.fail {
            return Err(DetectError::ProcessFailed {
                status: "exit status: 2".into(),
                stderr: "scanner exploded".into(),
            });
        }
        Ok(self.licenses.clone())
    }

    async fn detect_copyrights(
        &self,
        _blobs: &[Blob],
    ) -> Result<HashMap<String, Vec<String>>, DetectError> {
        if self.fail {
            return Err(DetectError::ProcessFailed {
                status: "exit status: 2".into(),
                stderr: "scanner exploded".into(),
            });
        }
        Ok(self.copyrights.clone())
    }
}

/// Run the whole pipeline for a repo defaulting to the permissive family.
async fn check(diff: &str, detector: &MockDetector) -> Report {
    let families = LicenseFamilies::default();
    let policy = LicensePolicy::resolve("BSD-3-Clause-Clear", &families);
    let changes = parse_patch(diff, &Exclusions::none());

    let license_issues = LicenseChecker::new(&policy)
        .run(&changes, detector)
        .await
        .unwrap();
    let copyright_issues = CopyrightChecker::new()
        .run(&changes, detector)
        .await
        .unwrap();

    aggregate(license_issues, copyright_issues, &families)
}

const NEW_FILE_DIFF: &str = "\
diff --git a/src/fresh.c b/src/fresh.c
new file mode 100644
index 0000000..1234567
--- /dev/null
+++ b/src/fresh.c
@@ -0,0 +1,2 @@
+int fresh(void) {
+}
";

const RELICENSE_DIFF: &str = "\
diff --git a/src/core.c b/src/core.c
index 1234567..abcdefg 100644
--- a/src/core.c
+++ b/src/core.c
@@ -1,2 +1,2 @@
-/* SPDX-License-Identifier: GPL-2.0-only */
+/* SPDX-License-Identifier: MIT */
 int core(void) { return 0; }
";

#[tokio::test]
async fn new_source_file_without_license_blocks() {
    let detector = MockDetector::default();
    let report = check(NEW_FILE_DIFF, &detector).await;

    assert_eq!(
        report.flagged["src/fresh.c"].license_issues,
        vec!["No license added for source file: src/fresh.c"],
    );
    assert!(report.warned.is_empty());
    assert!(report.exit_code() >= 1);
}

#[tokio::test]
async fn permissive_relicense_passes() {
    let detector = MockDetector::with_licenses(&[
        ("0_added", "MIT"),
        ("0_deleted", "GPL-2.0-only"),
    ]);
    let report = check(RELICENSE_DIFF, &detector).await;

    assert!(report.is_clean());
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn copyleft_relicense_blocks() {
    let detector = MockDetector::with_licenses(&[
        ("0_added", "GPL-2.0-only"),
        ("0_deleted", "MIT"),
    ]);
    let report = check(RELICENSE_DIFF, &detector).await;

    assert_eq!(
        report.flagged["src/core.c"].license_issues,
        vec!["License deleted: MIT and license added: GPL-2.0-only"],
    );
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn unresolved_reference_downgrades_to_warning() {
    let detector = MockDetector::with_licenses(&[(
        "0_added",
        "LicenseRef-scancode-unknown-license-reference",
    )]);
    let report = check(NEW_FILE_DIFF, &detector).await;

    assert!(report.flagged.is_empty());
    assert_eq!(
        report.warned["src/fresh.c"].license_issues,
        vec![
            "Incompatible license added: LicenseRef-scancode-unknown-license-reference"
        ],
    );
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn proprietary_reference_stays_blocking() {
    let detector = MockDetector::with_licenses(&[(
        "0_added",
        "LicenseRef-scancode-proprietary-license",
    )]);
    let report = check(NEW_FILE_DIFF, &detector).await;

    assert_eq!(
        report.flagged["src/fresh.c"].license_issues,
        vec!["Incompatible license added: LicenseRef-scancode-proprietary-license"],
    );
    assert!(report.warned.is_empty());
}

#[tokio::test]
async fn dual_license_with_permissive_option_passes() {
    let detector = MockDetector::with_licenses(&[("0_added", "(MIT OR GPL-2.0-only) AND MIT")]);
    let report = check(NEW_FILE_DIFF, &detector).await;

    assert!(report.is_clean());
}

#[tokio::test]
async fn and_of_copyleft_and_permissive_blocks() {
    let detector = MockDetector::with_licenses(&[("0_added", "GPL-2.0-only AND MIT")]);
    let report = check(NEW_FILE_DIFF, &detector).await;

    assert_eq!(
        report.flagged["src/fresh.c"].license_issues,
        vec!["Incompatible license added: GPL-2.0-only AND MIT"],
    );
}

#[tokio::test]
async fn copyright_removal_blocks_alongside_license_result() {
    let diff = "\
diff --git a/src/core.c b/src/core.c
index 1234567..abcdefg 100644
--- a/src/core.c
+++ b/src/core.c
@@ -1,3 +1,2 @@
-/* Copyright (c) 2019 Acme Corp */
 int core(void) { return 0; }
";
    let detector = MockDetector {
        copyrights: HashMap::from([("0_deleted".to_string(), vec!["Acme Corp".to_string()])]),
        ..MockDetector::default()
    };
    let report = check(diff, &detector).await;

    assert_eq!(
        report.flagged["src/core.c"].copyright_issues,
        vec!["Copyright deleted: Acme Corp"],
    );
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn exit_code_counts_flagged_files() {
    let diff = "\
diff --git a/src/a.c b/src/a.c
new file mode 100644
--- /dev/null
+++ b/src/a.c
@@ -0,0 +1,1 @@
+int a;
diff --git a/src/b.c b/src/b.c
new file mode 100644
--- /dev/null
+++ b/src/b.c
@@ -0,0 +1,1 @@
+int b;
";
    let detector = MockDetector::default();
    let report = check(diff, &detector).await;

    assert_eq!(report.flagged.len(), 2);
    assert_eq!(report.exit_code(), 2);
}

#[tokio::test]
async fn empty_diff_is_clean() {
    let detector = MockDetector::default();
    let report = check("no file blocks at all\n", &detector).await;

    assert!(report.is_clean());
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn excluded_paths_never_reach_the_engines() {
    let diff = "\
diff --git a/notes.md b/notes.md
new file mode 100644
--- /dev/null
+++ b/notes.md
@@ -0,0 +1,1 @@
+hello
";
    let detector = MockDetector::default();
    let report = check(diff, &detector).await;

    assert!(report.is_clean());
}

#[tokio::test]
async fn detector_failure_aborts_before_any_report() {
    let families = LicenseFamilies::default();
    let policy = LicensePolicy::resolve("BSD-3-Clause-Clear", &families);
    let changes = parse_patch(NEW_FILE_DIFF, &Exclusions::none());

    let detector = MockDetector::failing();
    let result = LicenseChecker::new(&policy).run(&changes, &detector).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("scanner exploded"));
}

#[tokio::test]
async fn evaluation_is_idempotent() {
    let detector = MockDetector::with_licenses(&[
        ("0_added", "GPL-2.0-only"),
        ("0_deleted", "MIT"),
    ]);

    let first = check(RELICENSE_DIFF, &detector).await;
    let second = check(RELICENSE_DIFF, &detector).await;

    assert_eq!(first.flagged, second.flagged);
    assert_eq!(first.warned, second.warned);
    assert_eq!(first.exit_code(), second.exit_code());
}

#[tokio::test]
async fn copyleft_repository_allows_copyleft_additions() {
    let families = LicenseFamilies::default();
    let policy = LicensePolicy::resolve("GPL-2.0-only", &families);
    let changes = parse_patch(NEW_FILE_DIFF, &Exclusions::none());

    let detector = MockDetector::with_licenses(&[("0_added", "GPL-3.0-or-later")]);
    let issues = LicenseChecker::new(&policy)
        .run(&changes, &detector)
        .await
        .unwrap();

    assert!(issues.is_empty());
}
