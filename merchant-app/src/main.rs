//! Merchant overview server.
//!
//! Reads configuration, installs telemetry, then serves the merchant API
//! on top of the feature-selected repository backend.

mod config;
mod telemetry;

use merchant_hex::{OverviewService, inbound::HttpServer};
use merchant_repo::build_repo;

use config::Config;
use telemetry::Telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Config comes first: it decides the log format.
    let config = Config::from_env()?;
    let telemetry = Telemetry::init(config.log_format)?;

    let result = serve(&config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server stopped with an error");
    }

    telemetry.shutdown();
    result
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        port = config.port,
        rate_limit_per_minute = config.rate_limit_per_minute,
        database = %config.redacted_database_url(),
        "starting merchant server"
    );

    // Connects and applies the embedded migrations.
    let repo = build_repo(&config.database_url).await?;

    let service = OverviewService::new(repo);
    tracing::debug!(pay_types = service.catalog().len(), "catalog loaded");

    HttpServer::with_rate_limit(service, config.rate_limit_per_minute)
        .run(&format!("0.0.0.0:{}", config.port))
        .await
}
