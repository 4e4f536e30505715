use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use git_export::{
    run_export, write_report, AppConfig, ExportMode, ExportOutcome, ExportReport, ExportRequest,
    GitCli, DEFAULT_GIT_PROGRAM, GIT_PROGRAM_ENV,
};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let mut command = build_cli();
    let matches = command.clone().get_matches();

    // Load environment variables
    let dotenv_loaded = load_environment_variables();

    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let git_from_env = env::var(GIT_PROGRAM_ENV).ok();

    // Missing revisions or directory: show the option table and stop
    let Some(config) = create_app_config(&matches, &cwd, git_from_env) else {
        command.print_help().context("Failed to print usage")?;
        return Ok(());
    };

    // Initialize logging
    initialize_logging(&config.log_level)?;
    if !dotenv_loaded {
        debug!("No .env file found, using system environment variables");
    }

    // Run the application
    run_application(config).await
}

fn build_cli() -> Command {
    Command::new("git-export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export the files changed between two git revisions, as copies or as diffs")
        .arg(
            Arg::new("old")
                .long("old")
                .visible_alias("oc")
                .value_name("REVISION")
                .help("[required] Old revision"),
        )
        .arg(
            Arg::new("young")
                .long("young")
                .visible_alias("yc")
                .value_name("REVISION")
                .help("[required] Young revision"),
        )
        .arg(
            Arg::new("directory")
                .short('d')
                .long("directory")
                .value_name("PATH")
                .help("[required] Directory to export to"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print one line per exported file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .long("diff")
                .help("Write per-file diffs instead of copying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("work-tree")
                .long("work-tree")
                .value_name("PATH")
                .help("Repository work tree to read files from (default: current directory)"),
        )
        .arg(
            Arg::new("git")
                .long("git")
                .value_name("PROGRAM")
                .help("Git executable to run (default: $GIT_EXPORT_GIT or git)"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("PATH")
                .help("Write a JSON report of the export to this file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("warn"),
        )
}

/// Pure function to create application configuration from CLI arguments.
/// Returns `None` when a required value is missing.
fn create_app_config(
    matches: &ArgMatches,
    cwd: &Path,
    git_from_env: Option<String>,
) -> Option<AppConfig> {
    let arg = |name: &str| matches.get_one::<String>(name).map(String::as_str);

    let work_tree = arg("work-tree")
        .map(|path| cwd.join(path))
        .unwrap_or_else(|| cwd.to_path_buf());

    let mode = if matches.get_flag("diff") {
        ExportMode::Diff
    } else {
        ExportMode::Copy
    };

    let request = ExportRequest::new(arg("old"), arg("young"), arg("directory"), &work_tree)?
        .with_mode(mode)
        .with_verbose(matches.get_flag("verbose"));

    let git_program = arg("git")
        .map(str::to_string)
        .or(git_from_env.filter(|program| !program.is_empty()))
        .unwrap_or_else(|| DEFAULT_GIT_PROGRAM.to_string());

    Some(AppConfig {
        request,
        git_program,
        report_path: arg("report").map(PathBuf::from),
        log_level: arg("log-level").unwrap_or("warn").to_string(),
    })
}

/// Initialize structured logging with tracing, on stderr so verbose output stays clean
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("tokio=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Load a .env file if one exists
fn load_environment_variables() -> bool {
    dotenvy::dotenv().is_ok()
}

/// Main application logic
async fn run_application(config: AppConfig) -> Result<()> {
    info!("Starting git-export");
    info!("Configuration: {:#?}", config);

    let request = &config.request;
    let git = GitCli::new(config.git_program.as_str(), &request.work_tree);

    // One line per file as it finishes; printed lines stay if git fails midway
    let mut verbose_log = VerboseLog::new(request.verbose, io::stdout());
    let result = run_export(&git, request, |outcome| verbose_log.record(outcome)).await;
    verbose_log
        .finish()
        .context("Failed to write verbose output")?;

    let report = result.with_context(|| {
        format!(
            "Export of {}..{} failed",
            request.old_revision, request.young_revision
        )
    })?;

    if let Some(path) = &config.report_path {
        write_report(&report, path)?;
    }

    print_summary(&report);

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} files could not be exported",
            report.failed,
            report.total_processed()
        );
    }

    info!("Export completed successfully");
    Ok(())
}

/// Writes one line per processed file when verbose output is on, nothing otherwise
struct VerboseLog<W: Write> {
    enabled: bool,
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> VerboseLog<W> {
    fn new(enabled: bool, out: W) -> Self {
        Self {
            enabled,
            out,
            error: None,
        }
    }

    fn record(&mut self, outcome: &ExportOutcome) {
        if !self.enabled || self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", outcome).and_then(|_| self.out.flush()) {
            self.error = Some(e);
        }
    }

    /// The first write error, if any line could not be printed
    fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn print_summary(report: &ExportReport) {
    info!("=== EXPORT REPORT ===");
    info!("Mode: {}", report.mode);
    info!("Files processed: {}", report.total_processed());
    match report.mode {
        ExportMode::Copy => {
            info!("Copied: {}", report.copied);
            info!("Missing from work tree: {}", report.missing);
        }
        ExportMode::Diff => info!("Diffs written: {}", report.written),
    }

    for outcome in report.failures() {
        error!("  {}", outcome);
    }
}
