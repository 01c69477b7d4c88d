// Human-readable labels derived from a computed snapshot.
use shared::models::{
    BollingerBands, BollingerPosition, IndicatorInterpretation, IndicatorSnapshot, Kdj, KdjSignal,
    Macd, MacdTrend, RsiSignal,
};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const KDJ_OVERBOUGHT: f64 = 80.0;
const KDJ_OVERSOLD: f64 = 20.0;

/// A missing RSI reads as neutral (50).
pub fn rsi_signal(rsi: Option<f64>) -> RsiSignal {
    let rsi = rsi.unwrap_or(50.0);
    if rsi > RSI_OVERBOUGHT {
        RsiSignal::Overbought
    } else if rsi < RSI_OVERSOLD {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}

pub fn bollinger_position(price: Option<f64>, bands: Option<&BollingerBands>) -> BollingerPosition {
    match (price, bands) {
        (Some(price), Some(bands)) if price != 0.0 => {
            if price > bands.upper {
                BollingerPosition::AboveUpperBand
            } else if price < bands.lower {
                BollingerPosition::BelowLowerBand
            } else {
                BollingerPosition::WithinBands
            }
        }
        _ => BollingerPosition::Unknown,
    }
}

pub fn kdj_signal(kdj: Option<&Kdj>) -> KdjSignal {
    let Some(&Kdj { k, d, .. }) = kdj else {
        return KdjSignal::Unknown;
    };
    if k > KDJ_OVERBOUGHT && d > KDJ_OVERBOUGHT {
        KdjSignal::Overbought
    } else if k < KDJ_OVERSOLD && d < KDJ_OVERSOLD {
        KdjSignal::Oversold
    } else if k > d {
        KdjSignal::Bullish
    } else if k < d {
        KdjSignal::Bearish
    } else {
        KdjSignal::Neutral
    }
}

pub fn macd_trend(macd: Option<&Macd>) -> MacdTrend {
    let Some(&Macd { macd, signal, histogram }) = macd else {
        return MacdTrend::Unknown;
    };
    if macd > signal && histogram > 0.0 {
        MacdTrend::BullishStrong
    } else if macd > signal && histogram < 0.0 {
        MacdTrend::BullishWeak
    } else if macd < signal && histogram < 0.0 {
        MacdTrend::BearishStrong
    } else if macd < signal && histogram > 0.0 {
        MacdTrend::BearishWeak
    } else {
        MacdTrend::Neutral
    }
}

pub fn interpret(snapshot: &IndicatorSnapshot) -> IndicatorInterpretation {
    IndicatorInterpretation {
        rsi_signal: rsi_signal(snapshot.rsi_14),
        bollinger_position: bollinger_position(
            snapshot.current_price,
            snapshot.bollinger_bands.as_ref(),
        ),
        kdj_signal: kdj_signal(snapshot.kdj.as_ref()),
        macd_trend: macd_trend(snapshot.macd.as_ref()),
    }
}
