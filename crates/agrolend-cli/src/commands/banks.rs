//! `agrolend banks` — List banks supported for fiat payouts.

use clap::Args;
use serde::Deserialize;

use super::DEFAULT_ENDPOINT;

#[derive(Args, Debug)]
pub struct BanksArgs {
    /// Filter by currency code (e.g. NGN).
    #[arg(short, long)]
    pub currency: Option<String>,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct Bank {
    name: String,
    code: String,
}

pub async fn run(args: &BanksArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/banks", args.endpoint);

    let client = reqwest::Client::new();
    let mut request = client.get(&url);
    if let Some(currency) = &args.currency {
        request = request.query(&[("currency", currency)]);
    }
    let resp = request.send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let banks: Vec<Bank> = r.json().await?;
            println!("Supported banks ({}):", banks.len());
            for bank in banks {
                println!("  [{}] {}", bank.code, bank.name);
            }
        }
        Ok(r) => {
            anyhow::bail!("bank list failed (HTTP {})", r.status());
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {e}");
        }
    }

    Ok(())
}
