//! Merchant CLI
//!
//! Command-line interface for the Merchant Overview API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use merchant_client::MerchantClient;
use merchant_types::ResolvedRate;

#[derive(Parser)]
#[command(name = "merchant")]
#[command(author, version, about = "Merchant Overview API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Merchant API
    #[arg(
        long,
        env = "MERCHANT_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    /// Merchant API key
    #[arg(long, env = "MERCHANT_API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Print the full dashboard overview as JSON
    Overview,
    /// Print the effective fee rate of each payment method
    Rates,
    /// List active payment methods
    PayTypes {
        /// Device class: desktop or mobile
        #[arg(long)]
        device: Option<String>,
    },
}

/// Renders rates as an aligned table, rates shown as percentages.
fn format_rates(rates: &[ResolvedRate]) -> String {
    if rates.is_empty() {
        return "No payment methods are priced for this merchant.".to_string();
    }

    let mut out = format!("{:<10} {:<12} {:>8}\n", "PAY TYPE", "NAME", "RATE");
    for rate in rates {
        out.push_str(&format!(
            "{:<10} {:<12} {:>7.2}%\n",
            rate.pay_type,
            rate.pay_type_display,
            rate.rate * 100.0
        ));
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = MerchantClient::new(&cli.api_url);
    if let Some(key) = cli.api_key {
        client = client.with_api_key(key);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Overview => {
            let overview = client.overview().await?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }

        Commands::Rates => {
            let rates = client.rates().await?;
            print!("{}", format_rates(&rates));
        }

        Commands::PayTypes { device } => {
            let pay_types = client.pay_types(device.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&pay_types)?);
        }
    }

    Ok(())
}
