use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use manifestquery::config::Config;
use manifestquery::discovery::FileFinder;
use manifestquery::manifest::{ComponentKind, ManifestIndex};
use manifestquery::report::{self, QueryOutput, Report, Reporter};

/// manifestquery - Semantic queries over Android manifests
#[derive(Parser, Debug)]
#[command(name = "manifestquery")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
struct Cli {
    /// AndroidManifest.xml or a project directory containing one
    path: PathBuf,

    /// Query to run (defaults to summary)
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Patterns to exclude when searching for a manifest (can be specified multiple times)
    #[arg(short, long, global = true)]
    exclude: Vec<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run every query and print an overview (package, launcher, SDK, permissions, components)
    Summary,
    /// Print the launcher activity
    Launcher,
    /// List protected and unprotected components of one kind
    Components {
        /// Component tag: activity, activity-alias, service, receiver, provider
        #[arg(short, long, default_value = "activity")]
        kind: String,
    },
    /// List requested permissions in declaration order
    Permissions,
    /// Print the effective target SDK version
    Sdk,
    /// Print the custom Application class
    Application,
    /// Resolve a class name against the manifest package
    Resolve {
        /// Class name as written in the manifest (".Main", "Login", "com.app.Main")
        name: String,
    },
    /// Write the manifest back out unchanged
    Save {
        /// Destination file
        dest: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for report::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => report::ReportFormat::Terminal,
            OutputFormat::Json => report::ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("manifestquery v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let finder = FileFinder::new(config);
    let manifest_path = finder.locate(&cli.path)?;

    info!("Loading manifest {}", manifest_path.display());
    let index = ManifestIndex::from_path(&manifest_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load manifest: {}", manifest_path.display()))?;

    let command = cli.command.clone().unwrap_or(Command::Summary);
    let output = match &command {
        Command::Summary => QueryOutput::Summary(index.summary(&config.components)),
        Command::Launcher => QueryOutput::Launcher(index.launcher()),
        Command::Components { kind } => {
            if kind.parse::<ComponentKind>().is_err() {
                warn!("'{}' is not a known component kind, querying it anyway", kind);
            }
            QueryOutput::Components {
                tag: kind.clone(),
                protection: index.find_components(kind),
            }
        }
        Command::Permissions => QueryOutput::Permissions(index.permissions()),
        Command::Sdk => QueryOutput::Sdk(index.sdk_version()),
        Command::Application => QueryOutput::Application(index.application_class_name()),
        Command::Resolve { name } => QueryOutput::Resolve {
            name: name.clone(),
            resolved: index.resolve(name),
        },
        Command::Save { dest } => {
            let message = index
                .save(dest)
                .into_diagnostic()
                .wrap_err("Failed to save manifest")?;
            QueryOutput::Save(message)
        }
    };

    let format: report::ReportFormat = match &cli.format {
        Some(format) => format.clone().into(),
        None => config.report.format.parse().unwrap_or_else(|e| {
            warn!("{}, falling back to terminal output", e);
            report::ReportFormat::Terminal
        }),
    };

    let reporter = Reporter::new(format, cli.output.clone()).with_header(!cli.quiet);
    reporter.report(&Report {
        manifest: manifest_path,
        package: index.package().to_string(),
        output,
    })
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations next to the manifest
        Config::from_default_locations(project_root(&cli.path))?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}

fn project_root(path: &Path) -> &Path {
    if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    }
}
