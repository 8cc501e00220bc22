//! Supplycast Command Line Interface
//!
//! Reads a genesis snapshot, projects locked versus liquid supply and
//! inflation-driven issuance day by day, and writes the resulting ledger as
//! delimited text.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use supplycast_genesis::Snapshot;
use supplycast_projection::{
    check_declared, classify_accounts, project, total_supply, unlock_schedule, write_ledger,
    MintParams, Minter,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "supplycast")]
#[command(about = "Project locked vs. liquid token supply from a genesis snapshot", long_about = None)]
#[command(version)]
struct Cli {
    /// Genesis snapshot to analyze
    #[arg(long, default_value = "genesis.json")]
    genesis: PathBuf,

    /// Destination for the projection ledger
    #[arg(long, alias = "csv", default_value = "genesis_analysis.csv")]
    out: PathBuf,

    /// Reference instant as Unix seconds; defaults to the current time.
    /// Fix this for reproducible runs.
    #[arg(long)]
    now: Option<i64>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let now = cli.now.unwrap_or_else(|| Utc::now().timestamp());
    info!(genesis = %cli.genesis.display(), now, "analyzing snapshot");

    let snapshot = Snapshot::load(&cli.genesis)
        .with_context(|| format!("failed to load {}", cli.genesis.display()))?;

    let accounts = classify_accounts(snapshot.accounts()?)?;
    let schedule = unlock_schedule(&accounts, now)?;

    let balances = snapshot.balances()?;
    let total = total_supply(&balances, &accounts);
    check_declared(&total, snapshot.declared_supply()?);

    let staked = snapshot.staked_tokens()?;
    let mint = snapshot.mint()?;
    let params = MintParams::from_genesis(&mint.params);
    let minter = Minter::from_genesis(&mint.minter);

    let rows = project(&schedule, total, staked, &params, minter)?;

    let file = File::create(&cli.out)
        .with_context(|| format!("failed to create {}", cli.out.display()))?;
    write_ledger(BufWriter::new(file), &rows)?;

    info!(rows = rows.len(), out = %cli.out.display(), "ledger written");
    Ok(())
}
