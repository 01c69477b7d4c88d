// Handler for raw bar retrieval
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::symbol_not_found;
use crate::data::market_data::MarketDataStore;
use crate::error::{EngineError, EngineResult};
use crate::services::{DataRange, HistoricalDataRequest, HistoricalDataResponse, DATA_SOURCE};

pub async fn handle_historical_data(
    req_payload: HistoricalDataRequest,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> EngineResult<HistoricalDataResponse> {
    if let (Some(from), Some(to)) = (req_payload.from, req_payload.to) {
        if from > to {
            return Err(EngineError::MarketDataError(format!(
                "Invalid date range: {} is after {}",
                from, to
            )));
        }
    }

    let store = market_data_store.read().await;
    let bars = store
        .get_bars(&req_payload.symbol, req_payload.from, req_payload.to)
        .ok_or_else(|| symbol_not_found(&req_payload.symbol))?;
    drop(store);

    if bars.is_empty() {
        tracing::warn!(
            symbol = %req_payload.symbol,
            from = ?req_payload.from,
            to = ?req_payload.to,
            "No bars in the requested range"
        );
    }

    Ok(HistoricalDataResponse {
        stock_code: req_payload.symbol,
        data_source: DATA_SOURCE.to_string(),
        total_records: bars.len(),
        data_range: DataRange {
            start_date: bars.first().map(|b| b.date),
            end_date: bars.last().map(|b| b.date),
        },
        historical_data: bars,
    })
}
