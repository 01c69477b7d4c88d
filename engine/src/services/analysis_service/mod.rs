// The AnalysisService struct and its dispatch to one handler module per
// operation.
use super::{
    AdvancedTechnicalResponse, HistoricalDataRequest, HistoricalDataResponse, IndicatorRequest,
    IndicatorResponse, LoadCsvRequest, LoadCsvResponse, SymbolAnalysis, TechnicalIndicatorsResponse,
};
use crate::config::settings::AnalysisSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::{EngineError, EngineResult};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

pub mod advanced_technical;
pub mod calculate_indicator;
pub mod helpers;
pub mod historical_data;
pub mod load_csv_data;
pub mod technical_indicators;

#[derive(Clone)]
pub struct AnalysisService {
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: AnalysisSettings,
    limiter: Arc<Semaphore>,
}

impl AnalysisService {
    pub fn new(market_data_store: Arc<RwLock<MarketDataStore>>, settings: AnalysisSettings) -> Self {
        let permits = settings.max_concurrency.max(1);
        AnalysisService {
            market_data_store,
            settings,
            limiter: Arc::new(Semaphore::new(permits)),
        }
    }

    pub fn market_data_store(&self) -> Arc<RwLock<MarketDataStore>> {
        self.market_data_store.clone()
    }

    pub async fn load_csv_data(&self, req_payload: LoadCsvRequest) -> EngineResult<LoadCsvResponse> {
        tracing::info!(
            symbol = %req_payload.symbol,
            path = %req_payload.file_path.display(),
            "Received LoadCsvRequest, dispatching to handler."
        );
        load_csv_data::handle_load_csv_data(req_payload, self.market_data_store.clone()).await
    }

    pub async fn load_directory(&self, dir: &Path, default_symbol: &str) -> EngineResult<Vec<LoadCsvResponse>> {
        tracing::info!(dir = %dir.display(), "Loading bar files from directory");
        load_csv_data::handle_load_directory(dir, default_symbol, self.market_data_store.clone()).await
    }

    pub async fn technical_indicators(&self, symbol: &str) -> EngineResult<TechnicalIndicatorsResponse> {
        tracing::info!(symbol = %symbol, "Received technical indicators request, dispatching to handler.");
        technical_indicators::handle_technical_indicators(
            symbol,
            self.market_data_store.clone(),
            &self.settings,
            self.limiter.clone(),
        )
        .await
    }

    pub async fn advanced_technical(&self, symbol: &str) -> EngineResult<AdvancedTechnicalResponse> {
        tracing::info!(symbol = %symbol, "Received advanced technical request, dispatching to handler.");
        advanced_technical::handle_advanced_technical(
            symbol,
            self.market_data_store.clone(),
            &self.settings,
            self.limiter.clone(),
        )
        .await
    }

    pub async fn calculate_indicator(&self, req_payload: IndicatorRequest) -> EngineResult<IndicatorResponse> {
        tracing::info!(
            symbol = %req_payload.symbol,
            indicator_type = %req_payload.indicator_type,
            parameters = %req_payload.parameters,
            "Received CalculateIndicatorRequest, dispatching to handler."
        );
        calculate_indicator::handle_calculate_indicator(req_payload, self.market_data_store.clone()).await
    }

    pub async fn historical_data(&self, req_payload: HistoricalDataRequest) -> EngineResult<HistoricalDataResponse> {
        tracing::info!(
            symbol = %req_payload.symbol,
            from = ?req_payload.from,
            to = ?req_payload.to,
            "Received HistoricalDataRequest, dispatching to handler."
        );
        historical_data::handle_historical_data(req_payload, self.market_data_store.clone()).await
    }

    /// Computes both reports for every stored symbol. At most
    /// `max_concurrency` snapshots are computed at once; results are ordered by
    /// symbol and a failing symbol does not fail the batch.
    pub async fn analyze_all(&self) -> Vec<(String, EngineResult<SymbolAnalysis>)> {
        let symbols = self.market_data_store.read().await.symbols();
        tracing::info!(symbols = symbols.len(), "Starting batch analysis");

        let handles: Vec<_> = symbols
            .into_iter()
            .map(|symbol| {
                let service = self.clone();
                let task_symbol = symbol.clone();
                let handle = tokio::spawn(async move {
                    let technical = service.technical_indicators(&task_symbol).await?;
                    let advanced = advanced_technical::advanced_from_report(&technical);
                    Ok::<_, EngineError>(SymbolAnalysis { technical, advanced })
                });
                (symbol, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (symbol, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(EngineError::from(join_error)),
            };
            if let Err(e) = &result {
                tracing::error!(symbol = %symbol, error_detail = %e, "Batch analysis failed for symbol");
            }
            results.push((symbol, result));
        }
        results
    }
}
