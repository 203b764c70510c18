use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eds_results::config::{
    find_config_file, get_config, load_config, user_config_path, write_config, Config,
    LOCAL_CONFIG_FILE,
};
use eds_results::models::ALL_FACETS;
use eds_results::results::DatabaseTable;
use eds_results::utils::Renderer;
use eds_results::ResultSet;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// EDS Results - Inspect discovery-service search responses
#[derive(Parser, Debug)]
#[command(name = "eds-results")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect statistics, facets and records of saved search responses", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors and skip status messages (command results are still printed)
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a saved search response
    #[command(alias = "i")]
    Inspect {
        /// Path to the response JSON file
        file: PathBuf,
    },

    /// List available facets
    #[command(alias = "f")]
    Facets {
        /// Path to the response JSON file
        file: PathBuf,

        /// Only show the facet with this id
        #[arg(long, default_value = ALL_FACETS)]
        id: String,
    },

    /// Show hits per searched database
    #[command(alias = "db")]
    Databases {
        /// Path to the response JSON file
        file: PathBuf,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (default: the user configuration directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let format = match cli.output {
        OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    };
    let renderer = Renderer::new(config.output.clone(), std::io::stdout().is_terminal());

    match cli.command {
        Commands::Inspect { file } => {
            let results = open_results(&file, &config)?;
            match format {
                OutputFormat::Json => print_json(&results.summary())?,
                _ => print!("{}", renderer.render_summary(&results)),
            }
        }
        Commands::Facets { file, id } => {
            let results = open_results(&file, &config)?;
            let facets = results.facets(&id);
            if facets.is_empty() {
                tracing::warn!("No facets matched '{}'", id);
            }
            match format {
                OutputFormat::Json => print_json(&facets)?,
                _ => println!("{}", renderer.render_facets(&facets)),
            }
        }
        Commands::Databases { file } => {
            let results = open_results(&file, &config)?;
            let stats = results
                .database_stats()
                .context("Response has no database statistics")?;
            match format {
                OutputFormat::Json => print_json(&stats)?,
                _ => println!("{}", renderer.render_databases(&stats)),
            }
        }
        Commands::InitConfig { path, force } => {
            let path = path
                .or_else(user_config_path)
                .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            write_config(&Config::default(), &path)?;
            if !cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn log_level<'a>(cli: &Cli, config: &'a Config) -> &'a str {
    if cli.quiet {
        return "error";
    }
    match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = log_level(cli, config);
    let json = config.logging.is_json();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("eds_results={}", level)),
        ))
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn open_results(path: &Path, config: &Config) -> Result<ResultSet> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let labels = Arc::new(DatabaseTable::from_config(&config.databases));
    let results = ResultSet::with_labels(raw, labels)
        .with_context(|| format!("Unusable search response in {}", path.display()))?;

    tracing::debug!(
        file = %path.display(),
        total_hits = results.total_hits(),
        "Loaded search response"
    );
    Ok(results)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
