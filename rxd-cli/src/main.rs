//! RXD CLI: replay bars through the decision engine.
//!
//! Commands:
//! - `run`: replay CSV or synthetic bars, write events as JSON lines, print a summary
//! - `check`: validate a TOML strategy config and report warmup
//! - `default-config`: print the default config as TOML

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rxd_core::data::{load_bars_csv, synthetic_bars};
use rxd_core::engine::{run_session, SessionReport};
use rxd_core::indicators::IndicatorSet;
use rxd_core::{RxdStrategy, StrategyConfig};

#[derive(Parser)]
#[command(name = "rxd", about = "RXD CLI: perceptron and filter decision engine")]
struct Cli {
    /// Emit logs as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay bars through the strategy and a paper broker.
    Run {
        /// Path to a TOML strategy config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV file with columns date,open,high,low,close,volume.
        #[arg(long)]
        bars: Option<PathBuf>,

        /// Generate this many synthetic bars instead of reading a CSV.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for synthetic bars.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Per-bar drift of synthetic bars, as a fraction.
        #[arg(long, default_value_t = 0.0)]
        drift: f64,

        /// Per-bar volatility of synthetic bars, as a fraction.
        #[arg(long, default_value_t = 0.01)]
        volatility: f64,

        /// Write decisions and fills here as JSON lines.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the summary as JSON.
        #[arg(long, default_value_t = false)]
        summary_json: bool,
    },
    /// Validate a strategy config without running it.
    Check {
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the default strategy config as TOML.
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Run {
            config,
            bars,
            synthetic,
            seed,
            drift,
            volatility,
            output,
            summary_json,
        } => run_cmd(
            config.as_deref(),
            bars.as_deref(),
            synthetic,
            (seed, drift, volatility),
            output.as_deref(),
            summary_json,
        ),
        Commands::Check { config } => check_cmd(&config),
        Commands::DefaultConfig => {
            let text = StrategyConfig::default()
                .to_toml_string()
                .context("failed to serialize default config")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> Result<StrategyConfig> {
    match path {
        Some(path) => StrategyConfig::load(path)
            .with_context(|| format!("invalid strategy config {}", path.display())),
        None => Ok(StrategyConfig::default()),
    }
}

fn run_cmd(
    config_path: Option<&Path>,
    bars_path: Option<&Path>,
    synthetic: Option<usize>,
    (seed, drift, volatility): (u64, f64, f64),
    output: Option<&Path>,
    summary_json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let bars = match (bars_path, synthetic) {
        (Some(_), Some(_)) => bail!("--bars and --synthetic are mutually exclusive"),
        (None, None) => bail!("one of --bars or --synthetic is required"),
        (Some(path), None) => load_bars_csv(path)?,
        (None, Some(0)) => bail!("--synthetic needs at least one bar"),
        (None, Some(n)) => {
            if !(volatility > 0.0) {
                bail!("--volatility must be positive");
            }
            synthetic_bars(n, seed, drift, volatility)
        }
    };
    info!(bars = bars.len(), mode = ?config.mode, symbol = %config.symbol, "replay starting");

    let report = run_session(&config, &bars)?;

    if let Some(path) = output {
        write_events(&report, path)
            .with_context(|| format!("failed to write events to {}", path.display()))?;
        info!(path = %path.display(), events = report.events.len(), "events written");
    }

    if summary_json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn write_events(report: &SessionReport, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for event in &report.events {
        serde_json::to_writer(&mut out, event)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn print_summary(report: &SessionReport) {
    let s = &report.summary;
    println!("Symbol:          {}", s.symbol);
    println!("Mode:            {:?}", s.mode);
    println!("Bars:            {} ({} void)", s.bars, s.void_bars);
    println!("Long decisions:  {}", s.long_decisions);
    println!("Short decisions: {}", s.short_decisions);
    println!("Fills:           {}", s.fills);
    println!("Closed trades:   {}", s.closed_trades);
    println!("Realized PnL:    {}", s.realized_pnl);
    println!("Final position:  {}", s.final_position);

    if !report.trades.is_empty() {
        let wins = report
            .trades
            .iter()
            .filter(|t| t.pnl.is_sign_positive() && !t.pnl.is_zero())
            .count();
        println!("Win rate:        {}/{}", wins, report.trades.len());
    }
}

fn check_cmd(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    let strategy = RxdStrategy::new(&config)?;
    let filters = strategy.filter_bank().filter_names();

    println!("Config OK: {}", path.display());
    println!("  mode:            {:?}", config.mode);
    println!("  instrument:      {} (step {})", config.symbol, config.price_step);
    println!("  scorer warmup:   {} bars", config.scorer_warmup());
    println!("  indicator warmup: {} bars", IndicatorSet::warmup(&config.indicators));
    let filters = match (strategy.filter_bank().is_enabled(), filters.is_empty()) {
        (false, _) => "disabled".to_string(),
        (true, true) => "none".to_string(),
        (true, false) => filters.join(", "),
    };
    println!("  filters:         {filters}");
    Ok(())
}
