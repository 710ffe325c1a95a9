//! tickbt-arena CLI.
//!
//! - `tickbt-arena run` - tick the warrior tree on a timer
//! - `tickbt-arena simulate` - advance a fixed number of ticks as fast as possible
//! - `tickbt-arena check-config` - print the effective configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use tickbt_arena::{advance, simulate, spawn, ArenaConfig, RunSummary};

#[derive(Parser)]
#[command(name = "tickbt-arena")]
#[command(about = "Run the reference grinding agent", version)]
struct Cli {
    /// YAML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick the agent until the tick limit or Ctrl-C
    Run {
        /// Stop after this many ticks (overrides `max_ticks`)
        #[arg(long)]
        ticks: Option<u64>,

        /// Print a YAML summary of the run on exit
        #[arg(long)]
        summary: bool,
    },

    /// Advance the agent a fixed number of ticks without a timer and print a YAML summary
    Simulate {
        /// Number of ticks to advance
        #[arg(long, default_value = "100")]
        ticks: u64,
    },

    /// Parse the configuration and print it back as YAML
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });

    if cli.json_logs {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { ticks, summary } => run(config, ticks, summary).await,
        Commands::Simulate { ticks } => {
            let report = simulate(&config, ticks).context("Simulation failed")?;
            log_report(&report);
            print!("{}", serde_yaml::to_string(&report)?);
            Ok(())
        }
        Commands::CheckConfig => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ArenaConfig> {
    match path {
        Some(path) => ArenaConfig::load(path),
        None => Ok(ArenaConfig::default()),
    }
}

async fn run(config: ArenaConfig, ticks: Option<u64>, summary: bool) -> Result<()> {
    let max_ticks = ticks.or(config.max_ticks);
    let mut tree = spawn(&config).context("Failed to build the warrior tree")?;

    info!(
        hz = config.tick_rate_hz,
        max_ticks = ?max_ticks,
        monsters = config.monsters.len(),
        "Starting arena"
    );

    let mut timer = interval(config.tick_period()?);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if max_ticks.is_some_and(|max| tree.ticks() >= max) {
            break;
        }

        tokio::select! {
            _ = timer.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }

        advance(&mut tree).context("Tick failed")?;

        if !tree.world().character.is_alive() {
            warn!(tick = tree.ticks(), "Character died");
            break;
        }
    }

    let report = RunSummary::collect(&tree);
    log_report(&report);
    if summary {
        print!("{}", serde_yaml::to_string(&report)?);
    }

    Ok(())
}

fn log_report(report: &RunSummary) {
    info!(
        ticks = report.ticks,
        kills = report.kills,
        gold = report.gold,
        hp = report.hp,
        "Arena finished"
    );
}
