//! GitHub Actions renderer.
//!
//! Emits workflow annotation commands (`::error` / `::warning`) so issues
//! surface inline on the pull request's changed files.

use crate::models::Severity;
use crate::output::ReportRenderer;
use crate::report::Report;

/// GitHub Actions annotation renderer.
pub struct GithubRenderer;

impl ReportRenderer for GithubRenderer {
    fn render(&self, report: &Report) -> String {
        let mut output = String::new();

        for issue in report.issues() {
            let level = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            output.push_str(&format!(
                "::{level} file={}::{}: {}\n",
                issue.file,
                issue.category,
                escape(&issue.message),
            ));
        }

        output
    }
}

/// Escape annotation message data per the workflow command syntax.
fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LicenseFamilies;
    use crate::report::aggregate;
    use indexmap::IndexMap;

    #[test]
    fn render_annotations() {
        let mut license_issues = IndexMap::new();
        license_issues.insert(
            "a.c".to_string(),
            vec![
                "Incompatible license added: GPL-2.0-only".to_string(),
                "Incompatible license added: LicenseRef-scancode-unknown-license-reference"
                    .to_string(),
            ],
        );
        let mut copyright_issues = IndexMap::new();
        copyright_issues.insert(
            "a.c".to_string(),
            vec!["Copyright deleted: Acme Corp".to_string()],
        );
        let report = aggregate(license_issues, copyright_issues, &LicenseFamilies::default());

        let output = GithubRenderer.render(&report);
        assert!(output.contains(
            "::error file=a.c::license: Incompatible license added: GPL-2.0-only"
        ));
        assert!(output.contains("::error file=a.c::copyright: Copyright deleted: Acme Corp"));
        assert!(output.contains(
            "::warning file=a.c::license: Incompatible license added: LicenseRef-scancode-unknown-license-reference"
        ));
    }

    #[test]
    fn render_empty_is_empty() {
        let output = GithubRenderer.render(&Report::default());
        assert!(output.is_empty());
    }

    #[test]
    fn escapes_command_characters() {
        assert_eq!(escape("50% done\nnext"), "50%25 done%0Anext");
    }
}
