use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use property_lookup::utils::logger;
use property_lookup::{api, CliConfig, ElasticsearchAddressStore, PpiClient, PropertyService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let verbose = cli.verbose;

    // 合併設定檔、命令列參數與環境變數
    let config = match cli.into_service_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.log_format, verbose || config.verbose);
    tracing::info!("Starting property-lookup service");
    tracing::debug!("Service config: {:?}", config);

    let addresses = ElasticsearchAddressStore::from_config(&config)?;
    let sales = PpiClient::from_config(&config)?;
    let service = Arc::new(PropertyService::new(addresses, sales));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, api::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
