//! JSON output renderer.
//!
//! Outputs `{"flagged": {...}, "warned": {...}, "summary": {...}}`,
//! preserving the file→issues mapping and diff order.

use crate::output::ReportRenderer;
use crate::report::Report;

/// JSON output renderer.
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> String {
        let output = serde_json::json!({
            "flagged": report.flagged,
            "warned": report.warned,
            "summary": report.summary(),
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LicenseFamilies;
    use crate::report::aggregate;
    use indexmap::IndexMap;

    #[test]
    fn render_json() {
        let mut license_issues = IndexMap::new();
        license_issues.insert(
            "a.c".to_string(),
            vec!["Incompatible license added: GPL-2.0-only".to_string()],
        );
        let report = aggregate(license_issues, IndexMap::new(), &LicenseFamilies::default());

        let output = JsonRenderer.render(&report);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            parsed["flagged"]["a.c"]["license_issues"][0],
            "Incompatible license added: GPL-2.0-only",
        );
        assert_eq!(parsed["summary"]["flagged_files"], 1);
        assert_eq!(parsed["summary"]["warnings"], 0);
    }

    #[test]
    fn render_empty_json() {
        let report = Report::default();
        let output = JsonRenderer.render(&report);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["flagged"].as_object().unwrap().is_empty());
        assert_eq!(parsed["summary"]["errors"], 0);
    }
}
