use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use mortgage_cli::config::{load_defaults, parse_assignment};
use mortgage_cli::render::{render_batch, render_snapshot};
use mortgage_cli::{FieldAssignment, OutputFormat, csv_loader, logging};
use mortgage_core::{CalculatorDefaults, CalculatorVariant, MortgageCalculator};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly mortgage payment estimator.
///
/// Computes principal and interest, property tax, insurance and PMI for a
/// home purchase, either for one configured scenario or for a CSV batch.
#[derive(Debug, Parser)]
#[command(name = "mortgage-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level or EnvFilter directive. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate one scenario from a config file and field edits.
    Estimate {
        /// TOML file with calculator defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Which calculator to emulate (full or sidebar).
        #[arg(long, default_value = "full")]
        variant: CalculatorVariant,

        /// Field edit applied after the defaults, e.g. `homePrice=450000`.
        /// Repeatable; edits apply in order. An empty value clears the field.
        #[arg(short, long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<FieldAssignment>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Estimate every scenario in a CSV file.
    Batch {
        /// Path to the scenarios CSV.
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn estimate(
    config: Option<PathBuf>,
    variant: CalculatorVariant,
    edits: Vec<FieldAssignment>,
    format: OutputFormat,
) -> Result<()> {
    let defaults = match &config {
        Some(path) => load_defaults(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CalculatorDefaults::default(),
    };

    let mut calculator = MortgageCalculator::create(variant, &defaults);
    let mut snapshot = calculator.snapshot();
    for FieldAssignment { field, value } in edits {
        debug!(%field, %value, "applying edit");
        snapshot = calculator.set_field(field, value);
    }

    println!(
        "{}",
        render_snapshot(&snapshot, format).context("Failed to render result")?
    );
    Ok(())
}

fn batch(
    file: PathBuf,
    format: OutputFormat,
) -> Result<()> {
    let scenarios = csv_loader::load_from_file(&file)
        .with_context(|| format!("Failed to load scenarios: {}", file.display()))?;
    info!(count = scenarios.len(), "evaluating scenarios");

    let results: Vec<_> = scenarios
        .into_iter()
        .map(|scenario| {
            let snapshot = scenario.evaluate();
            (scenario.label, snapshot)
        })
        .collect();

    print!(
        "{}",
        render_batch(&results, format).context("Failed to render results")?
    );
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    match cli.command {
        Command::Estimate {
            config,
            variant,
            set,
            format,
        } => estimate(config, variant, set, format),
        Command::Batch { file, format } => batch(file, format),
    }
}
