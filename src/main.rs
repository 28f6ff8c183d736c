use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lotabot_config::batch::{self, DEFAULT_BOTS_DIR};
use lotabot_config::render;
use lotabot_config::{Schema, Validator};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "validate-config")]
#[command(about = "Validate LotaBot bot configuration files", long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["path", "all"])))]
struct Cli {
    /// Configuration file to validate
    path: Option<PathBuf>,

    /// Validate every configuration in the bots directory
    #[arg(long)]
    all: bool,

    /// Directory scanned by --all
    #[arg(long, default_value = DEFAULT_BOTS_DIR)]
    dir: PathBuf,

    /// YAML file overriding the built-in schema tables
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.debug {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(cli.debug) // Show target module in debug mode
        .init();
}

/// Returns whether every validated document is valid.
fn run(cli: &Cli) -> Result<bool> {
    let validator = Validator::new(load_schema(cli.schema.as_deref())?);

    if cli.all {
        let batch = batch::validate_dir(&validator, &cli.dir)?;
        match cli.format {
            OutputFormat::Text => {
                for file in &batch.files {
                    println!("{}", render::render_text(&file.path, &file.report));
                }
                print!("{}", render::render_summary(&batch));
            }
            OutputFormat::Json => println!("{}", render::render_batch_json(&batch)?),
        }
        return Ok(batch.all_valid());
    }

    let Some(path) = cli.path.as_deref() else {
        anyhow::bail!("either a configuration path or --all is required");
    };
    let report = lotabot_config::validate_file(&validator, path);
    match cli.format {
        OutputFormat::Text => println!("{}", render::render_text(path, &report)),
        OutputFormat::Json => println!("{}", render::render_json(path, &report)?),
    }
    Ok(report.is_valid())
}

fn load_schema(path: Option<&Path>) -> Result<Schema> {
    let Some(path) = path else {
        return Ok(Schema::default());
    };
    debug!(path = %path.display(), "loading schema override");
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    Schema::from_yaml(&input)
        .with_context(|| format!("invalid schema file {}", path.display()))
}
