//! chainsplit — Command-line interface for referral-chain payout splits.
//!
//! Lists, edits and distributes a locally stored chain. Every edit
//! recomputes shares and rewrites the stored entry.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chainsplit_chain::view::{format_amount, format_share, hierarchy_path, tiered_path};
use chainsplit_chain::{ChainManager, FileStore};
use chainsplit_core::constants::DATE_FORMAT;
use chainsplit_core::types::DistributionSummary;
use clap::{Args, Parser, Subcommand};

use crate::config::Config;

/// Referral-chain payout splitter.
#[derive(Parser)]
#[command(name = "chainsplit")]
#[command(version, about = "Split an amount down a referral chain.")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Directory holding the chain (default: $CHAINSPLIT_DATA_DIR or the user data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key for the chain entry (default: $CHAINSPLIT_STORE_KEY or "referral_chain").
    #[arg(long, global = true)]
    store_key: Option<String>,

    /// Amount to distribute (default: $CHAINSPLIT_TOTAL or 1000). May be negative.
    #[arg(short, long, global = true, allow_hyphen_values = true)]
    total: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the chain with shares, amounts and summary.
    Show(ShowArgs),
    /// Add a participant at the tail of the chain.
    Add {
        /// Display name; the level suffix is appended automatically.
        name: String,
    },
    /// Remove a participant by id.
    Remove {
        /// Participant id as shown by `show`.
        id: u64,
    },
    /// Confirm the current split and print the payout table.
    Distribute,
    /// Print the percentage split for a chain of COUNT participants.
    Allocate {
        count: usize,
    },
    /// Replace the stored chain with the default three participants.
    Reset,
}

#[derive(Args)]
struct ShowArgs {
    /// Print the stored records as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.global.data_dir {
        config.data_dir = dir;
    }
    if let Some(key) = cli.global.store_key {
        config.store_key = key;
    }
    if let Some(total) = cli.global.total {
        config.total = total;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Allocate { count } => allocate(count),
        Commands::Show(args) => show(&config, args),
        Commands::Add { name } => add(&config, &name),
        Commands::Remove { id } => remove(&config, id),
        Commands::Distribute => distribute(&config),
        Commands::Reset => reset(&config),
    }
}

/// Open the chain described by `config`.
fn open(config: &Config) -> Result<ChainManager<FileStore>> {
    let store = FileStore::new(&config.data_dir, config.store_key.clone());
    ChainManager::open(store, config.total)
        .with_context(|| format!("Failed to open chain in {}", config.data_dir.display()))
}

fn allocate(count: usize) -> Result<()> {
    let shares = chainsplit_alloc::allocate(count);
    for (i, share) in shares.iter().enumerate() {
        println!("{:>4}  {:>3}%", i + 1, share);
    }
    Ok(())
}

/// Print the chain table followed by the hierarchy and summary.
fn print_chain(manager: &ChainManager<FileStore>) {
    println!("\n=== DISTRIBUTION CHAIN ===");
    for p in manager.participants() {
        println!(
            "{:>3}  {:<28} {:>14}  {:<14} id={} joined={}",
            p.level,
            p.name,
            format_amount(p.amount),
            format_share(p.percentage),
            p.id,
            p.joined_date.format(DATE_FORMAT),
        );
    }
    if !manager.can_remove() {
        println!("(only one participant: removal disabled)");
    }

    println!("\nHierarchy: {}", hierarchy_path(manager.participants()));
    println!("Tiers:     {}", tiered_path(manager.participants()));
    print_summary(&manager.summary());
}

fn print_summary(summary: &DistributionSummary) {
    println!("\n=== SUMMARY ===");
    println!("Total amount:       {}", format_amount(summary.total));
    println!("Participants:       {}", summary.participant_count);
    println!("Total distributed:  {}", format_amount(summary.distributed));
}

fn show(config: &Config, args: ShowArgs) -> Result<()> {
    let manager = open(config)?;
    if args.json {
        let json = serde_json::to_string_pretty(manager.participants())
            .context("Failed to serialize chain")?;
        println!("{json}");
    } else {
        print_chain(&manager);
    }
    Ok(())
}

fn add(config: &Config, name: &str) -> Result<()> {
    let mut manager = open(config)?;
    match manager.add_participant(name).context("Failed to add participant")? {
        Some(id) => println!("Added participant {id}."),
        None => println!("Name is empty; nothing added."),
    }
    print_chain(&manager);
    Ok(())
}

fn remove(config: &Config, id: u64) -> Result<()> {
    let mut manager = open(config)?;
    if manager
        .remove_participant(id)
        .context("Failed to remove participant")?
    {
        println!("Removed participant {id}.");
    } else if !manager.can_remove() {
        println!("Only one participant remains; nothing removed.");
    } else {
        println!("No participant with id {id}; nothing removed.");
    }
    print_chain(&manager);
    Ok(())
}

fn distribute(config: &Config) -> Result<()> {
    let manager = open(config)?;
    let summary = manager.distribute();

    println!("\n=== PAYOUT ===");
    for p in manager.participants() {
        println!("{:<28} {:>14}", p.name, format_amount(p.amount));
    }
    print_summary(&summary);
    println!("\nAmount distributed successfully!");
    Ok(())
}

fn reset(config: &Config) -> Result<()> {
    let mut manager = open(config)?;
    manager.reset().context("Failed to reset chain")?;
    println!("Chain reset to defaults.");
    print_chain(&manager);
    Ok(())
}
