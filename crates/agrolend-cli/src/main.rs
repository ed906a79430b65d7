//! AgroLend CLI — operator interface for the settlement node.
//!
//! Subcommands: status, mint, supply, repay, banks.

mod commands;

use clap::{Parser, Subcommand};

/// AgroLend — fiat-to-chain settlement for micro-lending pools.
#[derive(Parser, Debug)]
#[command(name = "agrolend", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query the status of a running settlement node.
    Status(commands::status::StatusArgs),
    /// Mint fiat tokens to an account with the admin key.
    Mint(commands::mint::MintArgs),
    /// Settle a confirmed payment as a pool supply.
    Supply(commands::supply::SupplyArgs),
    /// Settle a confirmed payment as a loan repayment.
    Repay(commands::repay::RepayArgs),
    /// List banks supported for fiat payouts.
    Banks(commands::banks::BanksArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Status(args) => commands::status::run(args).await,
        Commands::Mint(args) => commands::mint::run(args).await,
        Commands::Supply(args) => commands::supply::run(args).await,
        Commands::Repay(args) => commands::repay::run(args).await,
        Commands::Banks(args) => commands::banks::run(args).await,
    }
}
