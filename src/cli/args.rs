//! Clap argument types and output format dispatch.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// License and copyright compliance checker for CI diffs.
#[derive(Parser, Debug)]
#[command(
    name = "licheck",
    version = licheck::constants::VERSION,
    about = "Checks a unified diff against a license/copyright compliance policy",
)]
pub struct Cli {
    /// Disable anonymous usage telemetry.
    #[arg(long, global = true, default_value_t = false)]
    pub no_telemetry: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Check a diff against the compliance policy.
    Check(CheckArgs),

    /// List configured project-to-license mappings.
    Projects(ProjectsArgs),

    /// Print version information.
    Version,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the unified diff file to evaluate.
    pub diff_file: PathBuf,

    /// Repository identifier, e.g. "acme/quartz".
    pub repo: String,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Explicit config file, replacing layered discovery.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress the success acknowledgment on clean runs.
    #[arg(long, short = 'q', default_value_t = false)]
    pub quiet: bool,
}

/// Arguments for the `projects` subcommand.
#[derive(Parser, Debug)]
pub struct ProjectsArgs {
    /// Explicit config file, replacing layered discovery.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Github,
}

impl OutputFormat {
    /// Render a report using the renderer for this format.
    pub fn render(&self, report: &licheck::report::Report) -> String {
        use licheck::output::ReportRenderer;
        match self {
            OutputFormat::Terminal => licheck::output::terminal::TerminalRenderer.render(report),
            OutputFormat::Json => licheck::output::json::JsonRenderer.render(report),
            OutputFormat::Github => licheck::output::github::GithubRenderer.render(report),
        }
    }
}
