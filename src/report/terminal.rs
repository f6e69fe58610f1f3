use super::{QueryOutput, Report};
use crate::manifest::{ComponentProtection, ManifestSummary};
use colored::Colorize;
use miette::Result;
use std::fmt::Write;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Print the manifest path and package above the result
    show_header: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_header: true }
    }

    pub fn with_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        print!("{}", self.render(report));
        Ok(())
    }

    /// Render a report to a string
    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();

        if self.show_header {
            let _ = writeln!(
                out,
                "{} {}",
                report.package.cyan().bold(),
                format!("({})", report.manifest.display()).dimmed()
            );
        }

        match &report.output {
            QueryOutput::Summary(summary) => render_summary(&mut out, summary),
            QueryOutput::Launcher(launcher) => {
                let _ = writeln!(out, "{} {}", "Launcher:".bold(), optional(launcher.as_deref()));
            }
            QueryOutput::Components { tag, protection } => {
                render_components(&mut out, tag, protection)
            }
            QueryOutput::Permissions(permissions) => render_permissions(&mut out, permissions),
            QueryOutput::Sdk(version) => {
                let _ = writeln!(out, "{} {}", "Target SDK:".bold(), version);
            }
            QueryOutput::Application(application) => {
                let _ = writeln!(
                    out,
                    "{} {}",
                    "Application:".bold(),
                    optional(application.as_deref())
                );
            }
            QueryOutput::Resolve { name, resolved } => {
                let _ = writeln!(out, "{} {} {}", name.dimmed(), "→".dimmed(), resolved.white());
            }
            QueryOutput::Save(message) => {
                let _ = writeln!(out, "{}", format!("✓ {}", message).green());
            }
        }

        out
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn optional(value: Option<&str>) -> String {
    match value {
        Some(value) => value.white().to_string(),
        None => "none".dimmed().to_string(),
    }
}

fn render_summary(out: &mut String, summary: &ManifestSummary) {
    let _ = writeln!(
        out,
        "{} {}",
        "Application:".bold(),
        optional(summary.application.as_deref())
    );
    let _ = writeln!(out, "{} {}", "Launcher:".bold(), optional(summary.launcher.as_deref()));
    let _ = writeln!(out, "{} {}", "Target SDK:".bold(), summary.sdk_version);
    let _ = writeln!(out);

    render_permissions(out, &summary.permissions);

    for (tag, protection) in &summary.components {
        let _ = writeln!(out);
        render_components(out, tag, protection);
    }
}

fn render_permissions(out: &mut String, permissions: &[String]) {
    let _ = writeln!(
        out,
        "{}",
        format!("Permissions ({}):", permissions.len()).yellow().bold()
    );
    for permission in permissions {
        let _ = writeln!(out, "  {}", permission);
    }
}

fn render_components(out: &mut String, tag: &str, protection: &ComponentProtection) {
    let _ = writeln!(
        out,
        "{}",
        format!("<{}> ({}):", tag, protection.len()).yellow().bold()
    );

    if protection.is_empty() {
        let _ = writeln!(out, "  {}", "none".dimmed());
        return;
    }

    for (name, permission) in &protection.protected {
        let _ = writeln!(
            out,
            "  {} {} {}",
            "●".green().bold(),
            name.white(),
            format!("[{}]", permission).dimmed()
        );
    }
    for name in &protection.unprotected {
        let _ = writeln!(
            out,
            "  {} {} {}",
            "○".red(),
            name.white(),
            "[unprotected]".red()
        );
    }
}
