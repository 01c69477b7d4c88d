// Handler for the advanced indicator report with signal interpretation
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

use super::technical_indicators::handle_technical_indicators;
use crate::config::settings::AnalysisSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineResult;
use crate::indicators::signals;
use crate::services::{AdvancedTechnicalResponse, TechnicalIndicatorsResponse};
use shared::models::AdvancedIndicators;

pub async fn handle_advanced_technical(
    symbol: &str,
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: &AnalysisSettings,
    limiter: Arc<Semaphore>,
) -> EngineResult<AdvancedTechnicalResponse> {
    let report = handle_technical_indicators(symbol, market_data_store, settings, limiter).await?;
    Ok(advanced_from_report(&report))
}

/// Derives the advanced report from an already computed technical report.
pub fn advanced_from_report(report: &TechnicalIndicatorsResponse) -> AdvancedTechnicalResponse {
    let snapshot = &report.technical_indicators;
    AdvancedTechnicalResponse {
        stock_code: report.stock_code.clone(),
        data_source: report.data_source.clone(),
        update_time: report.update_time,
        analysis_period_days: report.analysis_period_days,
        data_points_analyzed: report.data_points_analyzed,
        advanced_indicators: AdvancedIndicators::from(snapshot),
        indicator_interpretation: signals::interpret(snapshot),
    }
}
