// Technical indicators module
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod kdj;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod signals;
pub mod sma;
pub mod snapshot;
pub mod stats;
pub mod support_resistance;
pub mod williams_r;

pub use atr::Atr;
pub use bollinger::Bollinger;
pub use cci::Cci;
pub use ema::Ema;
pub use kdj::KdjCalculator;
pub use macd::MacdCalculator;
pub use rsi::Rsi;
pub use sma::Sma;
pub use snapshot::IndicatorEngine;
pub use williams_r::WilliamsR;

use serde_json::Value;
use shared::models::Bar;

// Common trait for single-line indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    /// One entry per input bar; `None` until the trailing window is populated
    /// or where the window is degenerate.
    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>>;
}

pub(crate) fn closes(data: &[Bar]) -> Vec<f64> {
    data.iter().map(|b| b.close).collect()
}

pub(crate) fn highs(data: &[Bar]) -> Vec<f64> {
    data.iter().map(|b| b.high).collect()
}

pub(crate) fn lows(data: &[Bar]) -> Vec<f64> {
    data.iter().map(|b| b.low).collect()
}

/// True when `value` is zero up to accumulated rounding error relative to `scale`.
pub(crate) fn is_negligible(value: f64, scale: f64) -> bool {
    value.abs() <= 1e-12 * scale.abs().max(1.0)
}
