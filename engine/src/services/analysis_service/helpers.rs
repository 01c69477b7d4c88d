// Helper functions shared by the analysis service handlers
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

use crate::data::market_data::MarketDataStore;
use crate::error::{EngineError, EngineResult};
use crate::indicators::IndicatorEngine;
use shared::models::{Bar, IndicatorSnapshot};

/// Maps a loader failure onto the engine taxonomy, keeping the I/O and csv
/// sources when the loader passed them through.
pub fn classify_load_error(err: anyhow::Error) -> EngineError {
    if err.downcast_ref::<std::io::Error>().is_some() {
        return match err.downcast::<std::io::Error>() {
            Ok(source) => EngineError::IoError { source },
            Err(err) => EngineError::AnyhowError(err),
        };
    }
    if err.downcast_ref::<csv::Error>().is_some() {
        return match err.downcast::<csv::Error>() {
            Ok(source) => EngineError::CsvSystemError { source },
            Err(err) => EngineError::AnyhowError(err),
        };
    }
    EngineError::CsvDataFormatError(format!("{:#}", err))
}

pub fn symbol_not_found(symbol: &str) -> EngineError {
    EngineError::MarketDataError(format!("Symbol '{}' not found in market data store", symbol))
}

/// Symbol for a bar file: its stem, or `default_symbol` when the stem is blank.
pub fn symbol_for_path(path: &Path, default_symbol: &str) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(default_symbol)
        .to_string()
}

/// The trailing `history_days` bars of `symbol`. The store lock is released
/// before returning.
pub async fn analysis_window(
    market_data_store: &RwLock<MarketDataStore>,
    symbol: &str,
    history_days: usize,
) -> EngineResult<Vec<Bar>> {
    let store = market_data_store.read().await;
    match store.tail(symbol, history_days) {
        Some(bars) if !bars.is_empty() => Ok(bars),
        _ => Err(symbol_not_found(symbol)),
    }
}

/// Runs the indicator engine on the blocking pool once a permit is available.
pub async fn compute_snapshot(bars: Vec<Bar>, limiter: Arc<Semaphore>) -> EngineResult<IndicatorSnapshot> {
    let permit = limiter
        .acquire_owned()
        .await
        .map_err(|e| EngineError::ProcessingError(format!("Analysis limiter closed: {}", e)))?;
    let snapshot = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        IndicatorEngine::compute(&bars)
    })
    .await?;
    Ok(snapshot)
}
