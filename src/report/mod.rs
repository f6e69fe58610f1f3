mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::manifest::{ComponentProtection, ManifestSummary};
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" => Ok(ReportFormat::Terminal),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Result of a single CLI query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutput {
    Summary(ManifestSummary),
    Launcher(Option<String>),
    Components {
        tag: String,
        protection: ComponentProtection,
    },
    Permissions(Vec<String>),
    Sdk(u32),
    Application(Option<String>),
    Resolve {
        name: String,
        resolved: String,
    },
    Save(String),
}

/// A query result together with the manifest it came from
#[derive(Debug, Clone)]
pub struct Report {
    pub manifest: PathBuf,
    pub package: String,
    pub output: QueryOutput,
}

/// Reporter for outputting query results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_header: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_header: true,
        }
    }

    /// Print the manifest path and package above terminal results
    pub fn with_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new().with_header(self.show_header);
                reporter.report(report)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(report)
            }
        }
    }
}
