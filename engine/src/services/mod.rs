// Request and response types for the analysis service, plus the service itself.
pub mod analysis_service;

pub use analysis_service::AnalysisService;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{AdvancedIndicators, Bar, IndicatorInterpretation, IndicatorSnapshot};
use std::path::PathBuf;

pub const DATA_SOURCE: &str = "stock_insight_daily_bars";

#[derive(Debug, Clone, Deserialize)]
pub struct LoadCsvRequest {
    pub file_path: PathBuf,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadCsvResponse {
    pub success: bool,
    pub message: String,
    pub symbol: String,
    pub bars_loaded: usize,
    pub bars_stored: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalIndicatorsResponse {
    pub stock_code: String,
    pub data_source: String,
    pub update_time: DateTime<Utc>,
    pub analysis_period_days: usize,
    pub data_points_analyzed: usize,
    pub technical_indicators: IndicatorSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvancedTechnicalResponse {
    pub stock_code: String,
    pub data_source: String,
    pub update_time: DateTime<Utc>,
    pub analysis_period_days: usize,
    pub data_points_analyzed: usize,
    pub advanced_indicators: AdvancedIndicators,
    pub indicator_interpretation: IndicatorInterpretation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorRequest {
    pub symbol: String,
    pub indicator_type: String,
    /// JSON object, e.g. `{"period": 14}`. Empty means defaults.
    #[serde(default)]
    pub parameters: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorResponse {
    pub indicator_name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalDataRequest {
    pub symbol: String,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalDataResponse {
    pub stock_code: String,
    pub data_source: String,
    pub total_records: usize,
    pub data_range: DataRange,
    pub historical_data: Vec<Bar>,
}

/// Both reports for one symbol, as produced by a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolAnalysis {
    pub technical: TechnicalIndicatorsResponse,
    pub advanced: AdvancedTechnicalResponse,
}
