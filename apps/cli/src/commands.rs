//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use startable_core::pipeline::{ProgressReporter, RunConfig, RunResult};
use startable_shared::{AppConfig, StarsConfig, StartableError, init_config, load_config, load_config_from};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// Prefix of the daily log file under `paths.log_dir`.
const LOG_FILE_NAME: &str = "update_readme.log";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// startable: keep a README catalog table in sync with its CSV.
#[derive(Parser)]
#[command(
    name = "startable",
    version,
    about = "Enrich a catalog CSV with GitHub star counts and regenerate the README table.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ./startable.toml, then ~/.startable/startable.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `run`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Update star counts in the CSV, then regenerate the README table.
    Run {
        /// README containing the table section.
        #[arg(long)]
        readme: Option<PathBuf>,

        /// Catalog CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Update star counts in the CSV only.
    Stars {
        /// Catalog CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Regenerate the README table from the CSV without network access.
    Table {
        /// README containing the table section.
        #[arg(long)]
        readme: Option<PathBuf>,

        /// Catalog CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print the Markdown table for the CSV to stdout.
    Render {
        /// Catalog CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write ./startable.toml with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Config + tracing setup
// ---------------------------------------------------------------------------

/// Load config from `--config` when given, else the default lookup.
pub(crate) fn load_app_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Initialize tracing: console on stderr plus a daily-rotated log file.
///
/// The returned guard flushes the file writer on drop and must live until
/// the end of `main`.
pub(crate) fn init_tracing(cli: &Cli, log_dir: &Path) -> Result<WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match cli.verbose {
        0 => "startable=info",
        1 => "startable=debug",
        _ => "startable=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    std::fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("cannot create log directory {}", log_dir.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .wrap_err("cannot open log file")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    match cli.log_format {
        LogFormat::Text => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .init();
        }
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(guard)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
///
/// Top-level failures are logged once, classified by kind, then returned so
/// the process exits non-zero.
pub(crate) async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Run {
        readme: None,
        csv: None,
    });

    let outcome = match command {
        Command::Run { readme, csv } => cmd_run(&config, readme, csv).await,
        Command::Stars { csv } => cmd_stars(&config, csv).await,
        Command::Table { readme, csv } => cmd_table(&config, readme, csv),
        Command::Render { csv } => cmd_render(&config, csv),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    };

    if let Err(e) = &outcome {
        error!("{}", failure_message(e));
    }
    Ok(outcome?)
}

/// One-line description of a top-level failure.
fn failure_message(err: &StartableError) -> String {
    match err {
        StartableError::NotFound { path } => format!("File not found: {}", path.display()),
        StartableError::PermissionDenied { path } => {
            format!("Permission error: {}", path.display())
        }
        other => format!("Unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(
    config: &AppConfig,
    readme: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> startable_shared::Result<()> {
    let run_config = RunConfig {
        readme_path: readme.unwrap_or_else(|| config.paths.readme.clone()),
        csv_path: csv.unwrap_or_else(|| config.paths.csv.clone()),
        stars: StarsConfig::from_app(config)?,
        markers: config.section.clone(),
    };

    let reporter = CliProgress::new();
    let result = startable_core::pipeline::run(&run_config, &reporter).await?;

    println!();
    println!("  README table updated!");
    println!("  Rows:        {}", result.enrich.rows);
    println!("  With stars:  {}", result.enrich.enriched);
    println!("  N/A:         {}", result.enrich.unavailable);
    println!("  Sections:    {}", result.readme.sections_replaced);
    println!("  Time:        {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_stars(config: &AppConfig, csv: Option<PathBuf>) -> startable_shared::Result<()> {
    let csv_path = csv.unwrap_or_else(|| config.paths.csv.clone());
    let stars = StarsConfig::from_app(config)?;

    info!(csv = %csv_path.display(), "updating star counts");

    let reporter = CliProgress::new();
    reporter.phase("Fetching GitHub star counts");
    let result =
        startable_core::enrichment::update_csv_with_stars(&csv_path, &stars, &reporter).await;
    reporter.finish();
    let result = result?;

    println!();
    println!("  Star counts updated!");
    println!("  CSV:         {}", result.csv_path.display());
    println!("  With stars:  {}", result.enriched);
    println!("  N/A:         {}", result.unavailable);
    println!("  Time:        {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_table(
    config: &AppConfig,
    readme: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> startable_shared::Result<()> {
    let readme_path = readme.unwrap_or_else(|| config.paths.readme.clone());
    let csv_path = csv.unwrap_or_else(|| config.paths.csv.clone());

    let result =
        startable_core::update::update_readme_table(&readme_path, &csv_path, &config.section)?;

    println!(
        "Updated {} ({} rows, {} section(s) replaced)",
        result.readme_path.display(),
        result.rows,
        result.sections_replaced
    );
    Ok(())
}

fn cmd_render(config: &AppConfig, csv: Option<PathBuf>) -> startable_shared::Result<()> {
    let csv_path = csv.unwrap_or_else(|| config.paths.csv.clone());
    let table = startable_core::update::csv_to_md_table(&csv_path)?;
    print!("{table}");
    Ok(())
}

fn cmd_config_init() -> startable_shared::Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> startable_shared::Result<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| StartableError::config(e.to_string()))?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Clear the spinner on error paths too.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn row_enriched(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Stars [{current}/{total}] {name}"));
    }

    fn done(&self, _result: &RunResult) {
        self.finish();
    }
}
