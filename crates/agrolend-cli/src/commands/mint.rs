//! `agrolend mint` — Mint fiat tokens to an account with the admin key.

use clap::Args;
use serde::Serialize;

use agrolend_core::TransactionResult;

use super::{print_result, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct MintArgs {
    /// Currency symbol of the fiat token (e.g. USDC).
    #[arg(short, long)]
    pub fiat: String,

    /// Recipient address.
    #[arg(short, long)]
    pub account: String,

    /// Amount in the token's smallest unit.
    #[arg(long)]
    pub amount: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Serialize)]
struct MintRequest {
    fiat: String,
    account: String,
    amount: String,
}

pub async fn run(args: &MintArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/mint", args.endpoint);
    let body = MintRequest {
        fiat: args.fiat.clone(),
        account: args.account.clone(),
        amount: args.amount.clone(),
    };

    println!("Minting {} {} to {}...", args.amount, args.fiat, args.account);
    println!();

    let client = reqwest::Client::new();
    let resp = client.post(&url).json(&body).send().await;

    match resp {
        Ok(r) => {
            let status = r.status();
            match r.json::<TransactionResult>().await {
                Ok(result) => print_result(&result),
                Err(_) => anyhow::bail!("mint failed (HTTP {status})"),
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {e}");
        }
    }

    Ok(())
}
