// FocusFlow - schema provisioning
// Creates the database, collections, attributes and indexes on the provider.
// Needs PUBLIC_APPWRITE_PROJECT_ID and APPWRITE_API_KEY; see config.rs for the rest.

use anyhow::{Context, Result};
use focusflow::config::AppwriteConfig;
use focusflow::http_config::HttpConfig;
use focusflow::provider::client::AppwriteClient;
use focusflow::provisioning::{setup_database, ProvisionOptions};
use focusflow::utils::logging::init_logging;
use log::{error, info};

async fn run() -> Result<()> {
    let config = AppwriteConfig::from_env().context("Failed to load provider configuration")?;
    config
        .require_api_key()
        .context("An API key is required to provision the schema")?;

    let client = AppwriteClient::new(&config, &HttpConfig::provisioning())
        .context("Failed to build HTTP client")?;

    info!("Starting database setup against {}", config.endpoint);
    let report = setup_database(&client, &config.database_id, &ProvisionOptions::default())
        .await
        .with_context(|| format!("Failed to set up database '{}'", config.database_id))?;

    report.log_summary();
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run().await {
        error!("Database setup failed: {:#}", e);
        std::process::exit(1);
    }
}
