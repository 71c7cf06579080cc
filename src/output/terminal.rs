//! Terminal renderer: styled flowing text grouped by file.
//!
//! Blocking errors come first, warnings after, files in diff order.

use colored::Colorize;

use crate::models::FileIssues;
use crate::output::ReportRenderer;
use crate::report::Report;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl ReportRenderer for TerminalRenderer {
    fn render(&self, report: &Report) -> String {
        if report.is_clean() {
            return format!(
                "{}",
                "  ✔ No license or copyright issues detected.\n".green()
            );
        }

        let mut output = String::new();

        for (file, issues) in &report.flagged {
            output.push_str(&format!(
                " {} {} in {}\n",
                "✖".red().bold(),
                "error".red().bold(),
                file.bold()
            ));
            push_issues(&mut output, issues);
            output.push('\n');
        }

        for (file, issues) in &report.warned {
            output.push_str(&format!(
                " {} {} in {}\n",
                "⚠".yellow().bold(),
                "warning".yellow().bold(),
                file.bold()
            ));
            push_issues(&mut output, issues);
            output.push('\n');
        }

        let summary = report.summary();
        output.push_str(&format!(
            "{}\n",
            "───────────────────────────────────".dimmed()
        ));
        output.push_str(&format!(
            " {} blocking {} in {} {}, {} {} in {} {}\n",
            summary.errors.to_string().red().bold(),
            if summary.errors == 1 { "issue" } else { "issues" },
            summary.flagged_files.to_string().bold(),
            if summary.flagged_files == 1 { "file" } else { "files" },
            summary.warnings.to_string().yellow().bold(),
            if summary.warnings == 1 { "warning" } else { "warnings" },
            summary.warned_files.to_string().bold(),
            if summary.warned_files == 1 { "file" } else { "files" },
        ));

        output
    }
}

fn push_issues(output: &mut String, issues: &FileIssues) {
    for issue in &issues.license_issues {
        output.push_str(&format!("   {} — {}\n", "license".cyan(), issue));
    }
    for issue in &issues.copyright_issues {
        output.push_str(&format!("   {} — {}\n", "copyright".cyan(), issue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LicenseFamilies;
    use crate::report::aggregate;
    use indexmap::IndexMap;

    fn map(entries: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn render_clean() {
        let report = Report::default();
        let output = TerminalRenderer.render(&report);
        assert!(output.contains("No license or copyright issues detected"));
    }

    #[test]
    fn render_blocking_before_warnings() {
        let report = aggregate(
            map(&[
                (
                    "warned.c",
                    &["Incompatible license added: LicenseRef-scancode-unknown-license-reference"],
                ),
                ("flagged.c", &["Incompatible license added: GPL-2.0-only"]),
            ]),
            map(&[("flagged.c", &["Copyright deleted: Acme Corp"])]),
            &LicenseFamilies::default(),
        );

        let output = TerminalRenderer.render(&report);
        let err_pos = output.find("flagged.c").unwrap();
        let warn_pos = output.find("warned.c").unwrap();
        assert!(err_pos < warn_pos, "errors must precede warnings");
        assert!(output.contains("Copyright deleted: Acme Corp"));
        assert!(output.contains("blocking"));
    }
}
