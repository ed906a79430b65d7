//! AgroLend Settlement Node — entry point.
//!
//! Bridges confirmed Paystack payments onto the lending-pool contracts and
//! exposes the settlement API consumed by the browser client.

// Public APIs for node internals — used by tests and external consumers.
#![allow(dead_code)]

mod api;
mod config;
mod state;
mod storage;

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use agrolend_chain::{AdminSigner, EvmChainClient};
use agrolend_provider::{PaystackClient, PaystackResolver};
use agrolend_settlement::SettlementOrchestrator;

use config::NodeConfig;
use state::AppState;
use storage::SettlementStore;

/// AgroLend Settlement Node
#[derive(Parser, Debug)]
#[command(name = "agrolend-node", version, about = "AgroLend Settlement Node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "agrolend.toml")]
    config: PathBuf,

    /// Override the API port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the chain RPC URL.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override the data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Handle --init flag
    if args.init {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        let config = NodeConfig::default();
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "wrote default config");
        return Ok(());
    }

    // Load configuration
    let mut config = NodeConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(api_port) = args.api_port {
        config.api.port = api_port;
    }
    if let Some(rpc_url) = args.rpc_url {
        config.chain.rpc_url = rpc_url;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    config.logging.level = args.log_level;

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::info!("AgroLend Settlement Node v{}", env!("CARGO_PKG_VERSION"));

    // Secrets come from the environment only.
    let admin_key = Zeroizing::new(
        std::env::var("ADMIN_PRIVATE_KEY").context("ADMIN_PRIVATE_KEY is not set")?,
    );
    let paystack_key = Zeroizing::new(
        std::env::var("PAYSTACK_SECRET_KEY").context("PAYSTACK_SECRET_KEY is not set")?,
    );

    let signer = AdminSigner::from_hex(&admin_key).context("invalid ADMIN_PRIVATE_KEY")?;
    let chain = Arc::new(
        EvmChainClient::connect(
            &config.chain.rpc_url,
            signer,
            Duration::from_secs(config.chain.receipt_timeout_secs),
            config.chain.confirmations,
        )
        .context("failed to build chain client")?,
    );

    let paystack = Arc::new(PaystackClient::with_base_url(
        paystack_key,
        config.paystack.base_url.clone(),
    ));
    let resolver = Arc::new(PaystackResolver::new(paystack.clone()));

    let store = Arc::new(
        SettlementStore::open(&config.storage.data_dir).context("failed to open storage")?,
    );
    tracing::info!(data_dir = %config.storage.data_dir.display(), "storage opened");

    let registry = config.registry();
    tracing::info!(tokens = ?registry.symbols(), "token registry loaded");

    let orchestrator =
        SettlementOrchestrator::new(chain.clone(), resolver, store, registry.clone());
    let state = Arc::new(AppState::new(orchestrator, chain, paystack, registry));

    let listen_addr: SocketAddr = config
        .api_addr()
        .parse()
        .context("invalid API listen address")?;

    // Set up graceful shutdown on SIGINT/SIGTERM
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
        tracing::info!("received shutdown signal");
    };

    tokio::select! {
        result = api::start_api_server(listen_addr, state) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "API server error");
            }
        }
        _ = shutdown => {
            tracing::info!("initiating graceful shutdown");
        }
    }

    tracing::info!("AgroLend node exited cleanly");
    Ok(())
}
