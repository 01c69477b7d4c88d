// Handler for single-line indicator series
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::symbol_not_found;
use crate::data::market_data::MarketDataStore;
use crate::error::{EngineError, EngineResult};
use crate::indicators::snapshot::{ATR_PERIOD, CCI_PERIOD, RSI_PERIOD, WILLIAMS_PERIOD};
use crate::indicators::{Atr, Cci, Ema, IndicatorCalculator, Rsi, Sma, WilliamsR};
use crate::services::{IndicatorRequest, IndicatorResponse};

const DEFAULT_AVERAGE_PERIOD: usize = 20;

pub async fn handle_calculate_indicator(
    req_payload: IndicatorRequest,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> EngineResult<IndicatorResponse> {
    tracing::debug!(symbol = %req_payload.symbol, indicator_type = %req_payload.indicator_type, "Handling indicator request");

    let store = market_data_store.read().await;
    let bars = store.get_bars(&req_payload.symbol, None, None);
    drop(store);

    let bars = match bars {
        Some(bars) if !bars.is_empty() => bars,
        _ => {
            tracing::warn!(symbol = %req_payload.symbol, "No bar data found to calculate indicator");
            return Err(symbol_not_found(&req_payload.symbol));
        }
    };

    let params = parse_parameters(&req_payload)?;
    let calculator = build_calculator(&req_payload.indicator_type, &params)?;
    let values = calculator.calculate(&bars);

    Ok(IndicatorResponse {
        indicator_name: calculator.name().to_string(),
        parameters: calculator.parameters(),
        values,
    })
}

fn parse_parameters(req_payload: &IndicatorRequest) -> EngineResult<Value> {
    if req_payload.parameters.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(&req_payload.parameters).map_err(|e| {
        tracing::error!(
            indicator_type = %req_payload.indicator_type,
            parameters = %req_payload.parameters,
            error_detail = ?e,
            "Invalid JSON parameters for indicator"
        );
        EngineError::IndicatorError(format!(
            "Invalid JSON parameters for indicator '{}': {}",
            req_payload.indicator_type, e
        ))
    })
}

fn period_param(params: &Value, default: usize) -> EngineResult<usize> {
    let period = match params.get("period") {
        None => default,
        Some(v) => v
            .as_u64()
            .map(|p| p as usize)
            .ok_or_else(|| EngineError::IndicatorError(format!("Indicator period must be a positive integer, got {}", v)))?,
    };
    if period == 0 {
        return Err(EngineError::IndicatorError("Indicator period cannot be 0".to_string()));
    }
    Ok(period)
}

pub(crate) fn build_calculator(indicator_type: &str, params: &Value) -> EngineResult<Box<dyn IndicatorCalculator>> {
    let calculator: Box<dyn IndicatorCalculator> = match indicator_type.trim().to_lowercase().as_str() {
        "sma" => Box::new(Sma::new(period_param(params, DEFAULT_AVERAGE_PERIOD)?)),
        "ema" => Box::new(Ema::new(period_param(params, DEFAULT_AVERAGE_PERIOD)?)),
        "rsi" => Box::new(Rsi::new(period_param(params, RSI_PERIOD)?)),
        "atr" => Box::new(Atr::new(period_param(params, ATR_PERIOD)?)),
        "williams_r" | "wr" => Box::new(WilliamsR::new(period_param(params, WILLIAMS_PERIOD)?)),
        "cci" => Box::new(Cci::new(period_param(params, CCI_PERIOD)?)),
        _ => {
            tracing::error!(indicator_type = %indicator_type, "Unknown indicator type requested");
            return Err(EngineError::IndicatorError(format!("Unknown indicator type: {}", indicator_type)));
        }
    };
    Ok(calculator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_calculator_defaults() {
        let params = json!({});
        assert_eq!(build_calculator("RSI", &params).unwrap().parameters(), json!({ "period": 14 }));
        assert_eq!(build_calculator("cci", &params).unwrap().parameters(), json!({ "period": 20 }));
        assert_eq!(build_calculator("sma", &json!({ "period": 5 })).unwrap().parameters(), json!({ "period": 5 }));
    }

    #[test]
    fn test_build_calculator_rejects_bad_input() {
        assert!(matches!(
            build_calculator("sma", &json!({ "period": 0 })),
            Err(EngineError::IndicatorError(_))
        ));
        assert!(matches!(
            build_calculator("sma", &json!({ "period": "ten" })),
            Err(EngineError::IndicatorError(_))
        ));
        assert!(matches!(
            build_calculator("vwap", &json!({})),
            Err(EngineError::IndicatorError(_))
        ));
    }
}
