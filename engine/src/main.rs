// stock-insight entry point: load bar files, analyze every symbol, print JSON
use anyhow::Context;
use engine::config::settings::EngineSettings;
use engine::data::market_data::MarketDataStore;
use engine::services::AnalysisService;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stock-insight...");

    let settings = EngineSettings::load().context("Failed to load engine settings")?;
    info!(
        data_dir = %settings.data.dir.display(),
        max_concurrency = settings.analysis.max_concurrency,
        history_days = settings.analysis.history_days,
        "Settings loaded"
    );

    let market_data_store = Arc::new(RwLock::new(MarketDataStore::new()));
    let service = AnalysisService::new(market_data_store, settings.analysis.clone());

    let loaded = service
        .load_directory(&settings.data.dir, &settings.data.default_symbol)
        .await
        .with_context(|| format!("Failed to read data directory '{}'", settings.data.dir.display()))?;
    let failed = loaded.iter().filter(|r| !r.success).count();
    if failed > 0 {
        warn!(failed, "Some bar files could not be loaded");
    }

    let mut reports = Vec::new();
    for (symbol, result) in service.analyze_all().await {
        match result {
            Ok(analysis) => reports.push(serde_json::to_value(&analysis)?),
            Err(e) => reports.push(json!({ "stock_code": symbol, "error": e.to_string() })),
        }
    }

    let report_count = reports.len();
    let output = json!({ "files": serde_json::to_value(&loaded)?, "reports": reports });
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(symbols = report_count, "Analysis complete");
    Ok(())
}
