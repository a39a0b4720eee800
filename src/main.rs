//! finstatements command-line entry point
//!
//! Loads the ledger named by the configuration, selects a pair of periods
//! and prints comparative statements as text tables or JSON.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use finstatements_config::{Config, ConfigError, Granularity};
use finstatements_core::{
    build_statement, cash_flow_summary, category_map, check_balance, load_ledger, load_options, reconcile_cash,
    trend_series, Comparison, CoreResult, CurrencyFormat, DefaultErrorLogger, ErrorContext, ErrorLogger,
    Ledger, LedgerOperations, MetricSpec, Period, PeriodSelector, RenderedStatement, StatementKind,
    StatementSettings,
};
use finstatements_loader::CsvFileSource;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "finstatements")]
#[command(version = "0.1.0")]
#[command(about = "Comparative financial statements from a debit/credit ledger", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Ledger CSV, overriding ledger.path from the configuration
    #[arg(short, long)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print comparative statements
    Statements {
        #[command(flatten)]
        selection: Selection,
        /// Which statement to print
        #[arg(long, value_enum, default_value_t = StatementChoice::All)]
        statement: StatementChoice,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// List the periods available for comparison
    Periods {
        /// month or year
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },
    /// Check double-entry balance and reconcile cash
    Check {
        #[command(flatten)]
        selection: Selection,
    },
    /// Print the monthly dashboard series
    Trend {
        /// Number of most recent months
        #[arg(short, long)]
        window: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the default configuration
    InitConfig,
}

#[derive(clap::Args, Debug)]
struct Selection {
    /// month or year
    #[arg(short, long)]
    granularity: Option<Granularity>,
    /// Current period, e.g. 2025-05 or 2025 (default: latest)
    #[arg(long)]
    current: Option<String>,
    /// Previous period (default: the one before current)
    #[arg(long)]
    previous: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StatementChoice {
    All,
    BalanceSheet,
    Income,
    CashFlow,
}

impl StatementChoice {
    fn kinds(&self) -> Vec<StatementKind> {
        match self {
            StatementChoice::All => StatementKind::ALL.to_vec(),
            StatementChoice::BalanceSheet => vec![StatementKind::BalanceSheet],
            StatementChoice::Income => vec![StatementKind::IncomeStatement],
            StatementChoice::CashFlow => vec![StatementKind::CashFlow],
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Command::InitConfig = args.command {
        print!("{}", Config::generate_default());
        return ExitCode::SUCCESS;
    }

    let (config, config_note) = match load_config(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
    if let Some(note) = config_note {
        log::info!("{}", note);
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// A missing file at the default location falls back to built-in settings
fn load_config(path: &Path) -> std::result::Result<(Config, Option<String>), ConfigError> {
    match Config::load(path.to_path_buf()) {
        Ok(config) => Ok((config, Some(format!("Config loaded from {}", path.display())))),
        Err(ConfigError::FileNotFound { .. }) if path == Path::new(DEFAULT_CONFIG) => Ok((
            Config::default(),
            Some(format!("No {} found; using built-in defaults", DEFAULT_CONFIG)),
        )),
        Err(e) => Err(e),
    }
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let ledger_path = args.ledger.clone().unwrap_or_else(|| config.ledger_path());
    let ledger = report("load ledger", load(&ledger_path, config))?;

    let mut stdout = io::stdout().lock();
    match &args.command {
        Command::Statements {
            selection,
            statement,
            json,
        } => {
            let comparison = report("select periods", select(&ledger, selection, config))?;
            print_statements(&ledger, comparison, statement.kinds(), *json, config, &mut stdout)?;
        }
        Command::Periods { granularity } => {
            print_periods(&ledger, granularity.unwrap_or(config.report.granularity), &mut stdout)?;
        }
        Command::Check { selection } => {
            let comparison = report("select periods", select(&ledger, selection, config))?;
            print_check(&ledger, comparison, config, &mut stdout)?;
        }
        Command::Trend { window, json } => {
            print_trend(&ledger, window.unwrap_or(config.dashboard.window), *json, config, &mut stdout)?;
        }
        Command::InitConfig => {}
    }

    Ok(())
}

/// Log a core error with its details before handing it to anyhow
fn report<T>(operation: &str, result: CoreResult<T>) -> Result<T> {
    result.map_err(|error| {
        let context = ErrorContext::new(operation.to_string())
            .with_data("code", serde_json::json!(error.code().to_string()));
        DefaultErrorLogger.log_error(&error, &context);
        anyhow::anyhow!("{}", error.to_details())
    })
}

fn load(path: &Path, config: &Config) -> CoreResult<Ledger> {
    let source = CsvFileSource::new(path);
    let categories = category_map(config)?;
    load_ledger(&source, &load_options(config), &categories)
}

fn select(ledger: &Ledger, selection: &Selection, config: &Config) -> CoreResult<Comparison> {
    let granularity = selection.granularity.unwrap_or(config.report.granularity);
    let selector = PeriodSelector::new(ledger, granularity);

    let parse = |value: &Option<String>| value.as_deref().map(str::parse::<Period>).transpose();
    match (parse(&selection.current)?, parse(&selection.previous)?) {
        (None, None) => selector.latest(),
        (Some(current), None) => selector.select_current(current),
        (Some(current), Some(previous)) => selector.select(current, previous),
        (None, Some(previous)) => {
            let current = selector.latest()?.current();
            selector.select(current, previous)
        }
    }
}

fn print_statements(
    ledger: &Ledger,
    comparison: Comparison,
    kinds: Vec<StatementKind>,
    json: bool,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let settings = StatementSettings::from_config(&config.report);
    let currency = CurrencyFormat::from_config(&config.currency);

    let rendered: Vec<RenderedStatement> = kinds
        .into_iter()
        .map(|kind| build_statement(kind, ledger, comparison, &settings).render(&currency))
        .collect();

    if json {
        let payload = serde_json::json!({
            "comparison": comparison,
            "statements": rendered,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(());
    }

    for statement in &rendered {
        write_table(statement, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_table(statement: &RenderedStatement, out: &mut impl Write) -> io::Result<()> {
    let labels: Vec<String> = statement
        .rows
        .iter()
        .map(|row| {
            if row.emphasis {
                row.label.clone()
            } else {
                format!("  {}", row.label)
            }
        })
        .collect();

    let mut widths: Vec<usize> = statement.headings.iter().map(|h| display_width(h)).collect();
    for (row, label) in statement.rows.iter().zip(&labels) {
        widths[0] = widths[0].max(display_width(label));
        for (i, cell) in row.cells().iter().enumerate().skip(1) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    writeln!(out, "{}", statement.title)?;
    let heading: Vec<String> = statement
        .headings
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i], i > 0))
        .collect();
    writeln!(out, "{}", heading.join("  "))?;
    writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)))?;

    for (row, label) in statement.rows.iter().zip(&labels) {
        let mut cells = vec![pad(label, widths[0], false)];
        for (i, cell) in row.cells().iter().enumerate().skip(1) {
            cells.push(pad(cell, widths[i], true));
        }
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    if right {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn print_periods(ledger: &Ledger, granularity: Granularity, out: &mut impl Write) -> Result<()> {
    let summary = ledger.summary();
    writeln!(
        out,
        "{} entries, {} accounts, {} to {}",
        summary.total_entries,
        summary.total_accounts,
        summary.period_start.as_deref().unwrap_or("-"),
        summary.period_end.as_deref().unwrap_or("-")
    )?;

    let selector = PeriodSelector::new(ledger, granularity);
    writeln!(out, "Available {} periods (newest first):", granularity)?;
    for period in selector.current_choices() {
        let earlier = selector.previous_choices(period).len();
        writeln!(out, "  {:<8} {:<10} {} earlier", period.to_string(), period.label(), earlier)?;
    }
    Ok(())
}

fn print_check(ledger: &Ledger, comparison: Comparison, config: &Config, out: &mut impl Write) -> Result<()> {
    let currency = CurrencyFormat::from_config(&config.currency);
    let balance = check_balance(ledger);
    writeln!(
        out,
        "Debits {} / Credits {} / Difference {}: {}",
        balance.total_debit,
        balance.total_credit,
        balance.difference,
        if balance.balanced { "balanced" } else { "NOT balanced" }
    )?;

    let settings = StatementSettings::from_config(&config.report);
    let summary = cash_flow_summary(ledger, comparison, &settings);
    for item in reconcile_cash(ledger, &summary, &settings) {
        writeln!(
            out,
            "{} {}: computed {} vs ledger {} ({})",
            settings.ending_label(),
            item.period.label(),
            currency.cell(Some(item.computed_ending)),
            currency.cell(Some(item.ledger_balance)),
            if item.is_reconciled() {
                "reconciled".to_string()
            } else {
                format!("off by {}", currency.cell(Some(item.discrepancy)))
            }
        )?;
    }
    Ok(())
}

fn print_trend(ledger: &Ledger, window: usize, json: bool, config: &Config, out: &mut impl Write) -> Result<()> {
    let metrics: Vec<MetricSpec> = config.dashboard.metrics.iter().map(MetricSpec::from).collect();
    let series = trend_series(ledger, &metrics, window);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&series)?)?;
        return Ok(());
    }

    let currency = CurrencyFormat::from_config(&config.currency);
    for s in &series {
        writeln!(out, "{}", s.metric)?;
        for point in &s.points {
            writeln!(out, "  {:<10} {:>16}", point.period.label(), currency.cell(Some(point.amount)))?;
        }
    }
    Ok(())
}
