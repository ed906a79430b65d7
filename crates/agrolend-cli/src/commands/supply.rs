//! `agrolend supply` — Settle a confirmed payment as a pool supply.

use clap::Args;
use serde::Serialize;

use agrolend_core::TransactionResult;

use super::{print_result, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct SupplyArgs {
    /// Payment reference returned by the provider at initiation.
    #[arg(short, long)]
    pub reference: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Serialize)]
struct SettleRequest {
    reference: String,
    provider: String,
}

pub async fn run(args: &SupplyArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/supply-on-behalf", args.endpoint);
    let body = SettleRequest {
        reference: args.reference.clone(),
        provider: "paystack".into(),
    };

    println!("Settling supply for reference {}...", args.reference);
    println!();

    let client = reqwest::Client::new();
    let resp = client.post(&url).json(&body).send().await;

    match resp {
        Ok(r) => {
            let status = r.status();
            match r.json::<TransactionResult>().await {
                Ok(result) => print_result(&result),
                Err(_) => anyhow::bail!("settlement failed (HTTP {status})"),
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {e}");
        }
    }

    Ok(())
}
