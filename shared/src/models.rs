use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session's summary for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kdj {
    #[serde(rename = "K")]
    pub k: f64,
    #[serde(rename = "D")]
    pub d: f64,
    #[serde(rename = "J")]
    pub j: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
    pub pivot_point: f64,
}

/// Point-in-time indicator values for the last bar of a series.
///
/// Every field is optional: an indicator whose trailing window is not yet
/// populated (or whose window is degenerate) is left out of the serialized
/// output entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma60: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_20d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_20d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility_20d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_volume_5d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_volume_20d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi_14: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atr_14: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub williams_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_bands: Option<BollingerBands>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cci_20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdj: Option<Kdj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<Macd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_resistance: Option<SupportResistance>,
}

/// The oscillator/band subset of a snapshot, as served by the advanced report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedIndicators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi_14: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<Macd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdj: Option<Kdj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_bands: Option<BollingerBands>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub williams_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cci_20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atr_14: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_resistance: Option<SupportResistance>,
}

impl From<&IndicatorSnapshot> for AdvancedIndicators {
    fn from(snapshot: &IndicatorSnapshot) -> Self {
        AdvancedIndicators {
            rsi_14: snapshot.rsi_14,
            macd: snapshot.macd,
            kdj: snapshot.kdj,
            bollinger_bands: snapshot.bollinger_bands,
            williams_r: snapshot.williams_r,
            cci_20: snapshot.cci_20,
            atr_14: snapshot.atr_14,
            support_resistance: snapshot.support_resistance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerPosition {
    AboveUpperBand,
    BelowLowerBand,
    WithinBands,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KdjSignal {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdTrend {
    BullishStrong,
    BullishWeak,
    BearishStrong,
    BearishWeak,
    Neutral,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorInterpretation {
    pub rsi_signal: RsiSignal,
    pub bollinger_position: BollingerPosition,
    pub kdj_signal: KdjSignal,
    pub macd_trend: MacdTrend,
}
