use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write, stderr, stdout};
use std::path::PathBuf;
use tenge_core::Statement;
use tenge_finance::LedgerEmitter;
use tenge_ingest::{DocumentFormat, StatementParsingService};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

mod config;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TENGE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "tenge", version = VERSION, about = "Kazakh bank statement extraction")]
struct Cli {
    /// error | warn | info | debug | trace (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Config file (default: ~/.tenge/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a .pdf or .txt statement and print the result
    Parse {
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Owner id stamped on ledger rows (csv output)
        #[arg(long, default_value = "local")]
        owner: String,
    },

    /// Report whether a file name has a supported statement extension
    Check { filename: PathBuf },

    /// Manage ~/.tenge/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full statement as JSON
    Json,
    /// Ledger rows as CSV
    Csv,
    /// Human-readable totals
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = config::config_path(cli.config.as_deref())?;
    let cfg = config::load_config(&config_path)?;
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    setup_logging(parse_log_level(level));

    match cli.command {
        Command::Parse { path, format, owner } => {
            let service = StatementParsingService::new(cfg.parser);
            let statement = service
                .parse(&path)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!(
                path = %path.display(),
                transactions = statement.transactions.len(),
                "parsed statement"
            );
            write_statement(&statement, format, &owner)?;
        }

        Command::Check { filename } => match DocumentFormat::from_path(&filename) {
            Some(format) => println!("{}: supported ({format:?})", filename.display()),
            None => bail!(
                "Unsupported statement format: {} (expected .pdf or .txt)",
                filename.display()
            ),
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&config_path)?,
            ConfigCommand::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries JSON/CSV, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn write_statement(statement: &Statement, format: OutputFormat, owner: &str) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, statement).context("serialize statement")?;
            writeln!(output)?;
        }
        OutputFormat::Csv => {
            let entries = LedgerEmitter::to_entries(statement, owner);
            LedgerEmitter::write_csv(&entries, &mut output)?;
        }
        OutputFormat::Summary => write_summary(statement, &mut output)?,
    }

    output.flush()?;
    Ok(())
}

fn write_summary<W: Write>(statement: &Statement, out: &mut W) -> Result<()> {
    let header = &statement.header;
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    writeln!(out, "Client:       {}", or_dash(header.client_name.clone()))?;
    writeln!(out, "IIN:          {}", or_dash(header.iin.clone()))?;
    writeln!(out, "Account type: {}", or_dash(header.account_type.clone()))?;
    for (code, account) in [
        ("KZT", &header.accounts.kzt),
        ("USD", &header.accounts.usd),
        ("EUR", &header.accounts.eur),
    ] {
        if let Some(account) = account {
            writeln!(out, "Account {code}:  {account}")?;
        }
    }
    if header.period_start.is_some() || header.period_end.is_some() {
        writeln!(
            out,
            "Period:       {} - {}",
            or_dash(header.period_start.map(|d| d.to_string())),
            or_dash(header.period_end.map(|d| d.to_string()))
        )?;
    }

    // (income, expense) per currency
    let mut totals: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for t in &statement.transactions {
        let entry = totals.entry(t.currency.as_str()).or_default();
        if t.is_income() {
            entry.0 += t.amount;
        } else {
            entry.1 += t.amount;
        }
    }

    writeln!(
        out,
        "Transactions: {} (income: {}, expense: {})",
        statement.transactions.len(),
        statement.incomes().count(),
        statement.expenses().count()
    )?;
    for (currency, (income, expense)) in &totals {
        writeln!(out, "  {currency}: +{income} / -{expense}")?;
    }

    Ok(())
}
