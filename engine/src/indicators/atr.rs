// Average True Range (ATR) indicator implementation
use super::{rolling, IndicatorCalculator};
use serde_json::Value;
use shared::models::Bar;

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

/// True range per bar. The first bar has no previous close and uses `high - low`.
pub fn true_range(data: &[Bar]) -> Vec<f64> {
    data.iter()
        .enumerate()
        .map(|(i, bar)| {
            let range = bar.high - bar.low;
            match i.checked_sub(1).map(|p| data[p].close) {
                Some(prev_close) => range
                    .max((bar.high - prev_close).abs())
                    .max((bar.low - prev_close).abs()),
                None => range,
            }
        })
        .collect()
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        rolling::rolling_mean(&true_range(data), self.period)
    }
}
