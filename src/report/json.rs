use super::{QueryOutput, Report};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        let json = render(report)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    manifest: String,
    package: &'a str,
    result: &'a QueryOutput,
}

fn render(report: &Report) -> Result<String> {
    let json = JsonReport {
        version: "1.0",
        manifest: report.manifest.to_string_lossy().to_string(),
        package: &report.package,
        result: &report.output,
    };
    serde_json::to_string_pretty(&json).into_diagnostic()
}
