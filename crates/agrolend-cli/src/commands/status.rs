//! `agrolend status` — Query the status of a running settlement node.

use clap::Args;
use serde::Deserialize;

use super::DEFAULT_ENDPOINT;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    version: String,
    admin_address: String,
    tokens: Vec<String>,
    uptime_secs: u64,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/status", args.endpoint);

    let client = reqwest::Client::new();
    let resp = client.get(&url).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let data: StatusResponse = r.json().await?;
            println!("Node Status:");
            println!("  Version:  {}", data.version);
            println!("  Admin:    {}", data.admin_address);
            println!("  Tokens:   {}", data.tokens.join(", "));
            println!("  Uptime:   {}s", data.uptime_secs);
        }
        Ok(r) => {
            anyhow::bail!("status query failed (HTTP {})", r.status());
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {e}");
            println!();
            println!("Is the node running? Start it with: agrolend-node");
        }
    }

    Ok(())
}
