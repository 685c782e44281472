use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use tax_cli::{app, logging, report};
use tax_core::AdjustableDeduction;
use tax_core::db::DbConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive personal income tax calculator.
///
/// Deduction defaults are read from the configured store at startup and
/// administrative changes are written back to it.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version)]
struct Cli {
    /// Database backend to use.
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `tax.db`) or `:memory:`.
    #[arg(long, global = true, default_value = "tax.db")]
    db: String,

    /// Run on built-in defaults without opening a store.
    #[arg(long, global = true)]
    no_store: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute tax for one JSON request.
    Calculate {
        /// Request file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        request: PathBuf,
    },

    /// Compute tax for every row of a CSV file with
    /// `totalIncome,wht,donation` columns.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },

    /// Show or change the adjustable deduction defaults.
    Deductions {
        #[command(subcommand)]
        action: DeductionsAction,
    },
}

#[derive(Debug, Subcommand)]
enum DeductionsAction {
    /// Print the current defaults and limits.
    Show,

    /// Set the default personal deduction.
    SetPersonal {
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },

    /// Set the default k-receipt deduction.
    SetKReceipt {
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file =
        File::open(path).with_context(|| format!("cannot open '{}'", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let repo = if cli.no_store {
        debug!("running without a deduction store");
        None
    } else {
        let db_config = DbConfig {
            backend: cli.backend,
            connection_string: cli.db,
        };
        Some(app::open_repository(&db_config).await?)
    };
    let settings = app::load_settings(repo.as_deref()).await?;

    match cli.command {
        Command::Calculate { request } => {
            let request = report::read_request(open_input(&request)?)
                .context("invalid tax request")?;
            let result = app::calculate(&settings, &request)?;
            print_json(&report::TaxResponse::from(&result))
        }
        Command::Batch { file } => {
            let details = app::calculate_batch(&settings, open_input(&file)?)?;
            print_json(&report::BatchResponse::from(details.as_slice()))
        }
        Command::Deductions { action } => match action {
            DeductionsAction::Show => {
                print_json(&report::DeductionsResponse::from(&settings.get_config()))
            }
            DeductionsAction::SetPersonal { amount } => {
                let value = app::update_deduction(
                    &settings,
                    repo.as_deref(),
                    AdjustableDeduction::Personal,
                    amount,
                )
                .await?;
                print_json(&report::PersonalDeductionResponse::new(value))
            }
            DeductionsAction::SetKReceipt { amount } => {
                let value = app::update_deduction(
                    &settings,
                    repo.as_deref(),
                    AdjustableDeduction::KReceipt,
                    amount,
                )
                .await?;
                print_json(&report::KReceiptResponse::new(value))
            }
        },
    }
}
