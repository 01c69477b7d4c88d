// Handlers for bar file ingestion
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::{classify_load_error, symbol_for_path};
use crate::data::csv_parser::{out_of_order_dates, BarCsvParser};
use crate::data::market_data::MarketDataStore;
use crate::error::{EngineError, EngineResult};
use crate::services::{LoadCsvRequest, LoadCsvResponse};

pub async fn handle_load_csv_data(
    req_payload: LoadCsvRequest,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> EngineResult<LoadCsvResponse> {
    let path = req_payload.file_path.clone();
    let bars = tokio::task::spawn_blocking(move || BarCsvParser::load_bars_from_csv(&path))
        .await?
        .map_err(|e| {
            tracing::error!(
                symbol = %req_payload.symbol,
                path = %req_payload.file_path.display(),
                error_detail = %format!("{:#}", e),
                "Failed to load bar file"
            );
            classify_load_error(e)
        })?;

    let unordered = out_of_order_dates(&bars);
    if !unordered.is_empty() {
        tracing::warn!(
            symbol = %req_payload.symbol,
            count = unordered.len(),
            first = %unordered[0],
            "Bar file is not in ascending date order; bars are re-sorted on store"
        );
    }

    let bars_loaded = bars.len();
    let mut store = market_data_store.write().await;
    let bars_stored = store.add_bars(&req_payload.symbol, bars).map_err(|e| {
        tracing::error!(symbol = %req_payload.symbol, error_detail = %e, "Error storing bars");
        EngineError::MarketDataError(e.to_string())
    })?;
    drop(store);

    tracing::info!(symbol = %req_payload.symbol, bars_loaded, bars_stored, "Stored bars");
    Ok(LoadCsvResponse {
        success: true,
        message: format!("Loaded {} bars for symbol {}", bars_loaded, req_payload.symbol),
        symbol: req_payload.symbol,
        bars_loaded,
        bars_stored,
    })
}

/// Loads every `*.csv` file in `dir`, one symbol per file.
///
/// A file that fails to load is reported with `success: false` and does not
/// stop the others. Only a directory that cannot be listed is an error.
pub async fn handle_load_directory(
    dir: &Path,
    default_symbol: &str,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> EngineResult<Vec<LoadCsvResponse>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && entry.file_type().await?.is_file() {
            paths.push(path);
        } else {
            tracing::debug!(path = %path.display(), "Skipping non-CSV directory entry");
        }
    }
    paths.sort();

    if paths.is_empty() {
        tracing::warn!(dir = %dir.display(), "No CSV bar files found");
    }

    let mut responses = Vec::with_capacity(paths.len());
    for path in paths {
        let symbol = symbol_for_path(&path, default_symbol);
        let request = LoadCsvRequest {
            file_path: path.clone(),
            symbol: symbol.clone(),
        };
        match handle_load_csv_data(request, market_data_store.clone()).await {
            Ok(response) => responses.push(response),
            Err(e) => {
                tracing::warn!(symbol = %symbol, path = %path.display(), error_detail = %e, "Skipping bar file");
                responses.push(LoadCsvResponse {
                    success: false,
                    message: e.to_string(),
                    symbol,
                    bars_loaded: 0,
                    bars_stored: 0,
                });
            }
        }
    }
    Ok(responses)
}
