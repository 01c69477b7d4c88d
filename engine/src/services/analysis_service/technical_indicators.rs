// Handler for the full technical indicator report
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

use super::helpers::{analysis_window, compute_snapshot};
use crate::config::settings::AnalysisSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineResult;
use crate::services::{TechnicalIndicatorsResponse, DATA_SOURCE};

pub async fn handle_technical_indicators(
    symbol: &str,
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: &AnalysisSettings,
    limiter: Arc<Semaphore>,
) -> EngineResult<TechnicalIndicatorsResponse> {
    let bars = analysis_window(&market_data_store, symbol, settings.history_days).await?;
    let data_points_analyzed = bars.len();
    let snapshot = compute_snapshot(bars, limiter).await?;

    tracing::debug!(symbol = %symbol, bars = data_points_analyzed, "Computed technical indicators");
    Ok(TechnicalIndicatorsResponse {
        stock_code: symbol.to_string(),
        data_source: DATA_SOURCE.to_string(),
        update_time: Utc::now(),
        analysis_period_days: settings.history_days,
        data_points_analyzed,
        technical_indicators: snapshot,
    })
}
