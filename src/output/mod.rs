//! Output renderers: terminal, JSON, GitHub Actions annotations.

pub mod github;
pub mod json;
pub mod terminal;

use crate::report::Report;

/// Trait for rendering a check report to an output format.
pub trait ReportRenderer {
    /// Render the report to a string.
    fn render(&self, report: &Report) -> String;
}
