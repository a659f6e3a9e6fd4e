use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::{debug, info};

use tax_core::IncomeCarryover;
use tax_core::calculations::BracketTable;
use tax_report::logging::{LogConfig, init_logging};
use tax_report::utils::parse_income;
use tax_report::{ComparisonReport, ConfigOverrides, OutputFormat, ReportConfig, render, server};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares taking income as eligible dividends against taking it as salary.
#[derive(Debug, Parser)]
#[command(name = "tax-compare")]
struct Cli {
    /// TOML config file with defaults for every command.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides `RUST_LOG`.
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
    /// Print the comparison to stdout.
    Report {
        #[command(flatten)]
        compare: CompareArgs,

        /// Output format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Serve the comparison page over HTTP.
    Serve {
        #[command(flatten)]
        compare: CompareArgs,

        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// List the jurisdictions with configured rates.
    Jurisdictions,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Income to compare; repeat for several (thousands separators allowed).
    #[arg(long = "income", value_parser = parse_income)]
    incomes: Vec<Decimal>,

    /// Province whose rates apply, e.g. "British Columbia".
    #[arg(long)]
    jurisdiction: Option<String>,

    /// Which income the provincial bracket walk starts from.
    #[arg(long, value_enum)]
    carryover: Option<CliCarryover>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCarryover {
    Shared,
    Independent,
}

impl From<CliCarryover> for IncomeCarryover {
    fn from(value: CliCarryover) -> Self {
        match value {
            CliCarryover::Shared => IncomeCarryover::Shared,
            CliCarryover::Independent => IncomeCarryover::Independent,
        }
    }
}

impl CompareArgs {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            jurisdiction: self.jurisdiction,
            incomes: self.incomes,
            carryover: self.carryover.map(Into::into),
            ..ConfigOverrides::default()
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig {
        level: cli.log_level,
        file: cli.log_file,
    })?;

    let config = ReportConfig::load_or_default(cli.config.as_deref())?;
    debug!(?config, "base configuration");

    match cli.command {
        Command::Report { compare, format } => {
            let config = config.with_overrides(ConfigOverrides {
                format,
                ..compare.into_overrides()
            });
            let records = config.comparisons()?;
            let report = ComparisonReport {
                jurisdiction: &config.jurisdiction,
                carryover: config.carryover,
                records: &records,
            };
            print!("{}", render(config.format, &report)?);
        }
        Command::Serve {
            compare,
            host,
            port,
        } => {
            let config = config.with_overrides(ConfigOverrides {
                host,
                port,
                ..compare.into_overrides()
            });
            config.validate()?;
            server::run_http_server(config)
                .await
                .context("comparison server failed")?;
        }
        Command::Jurisdictions => {
            let table = BracketTable::standard()?;
            for name in table.supported_jurisdictions() {
                println!("{name}");
            }
            info!("listed supported jurisdictions");
        }
    }

    Ok(())
}
