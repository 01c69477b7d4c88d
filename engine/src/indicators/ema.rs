// Exponential Moving Average (EMA) indicator implementation
use super::{closes, rolling, IndicatorCalculator};
use serde_json::Value;
use shared::models::Bar;

/// Adjust-free EMA of closes with `alpha = 2 / (period + 1)`, seeded at the
/// first close. Positions before the span is filled are reported as undefined.
pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        if self.period == 0 {
            return vec![None; data.len()];
        }
        rolling::ema_span(&closes(data), self.period)
            .into_iter()
            .enumerate()
            .map(|(i, v)| if i + 1 < self.period { None } else { Some(v) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::flat_bars;

    #[test]
    fn test_ema_calculation() {
        let bars = flat_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let results = Ema::new(3).calculate(&bars);
        // alpha 0.5: 10, 10.5, 11.25, 12.125, 13.0625
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], None);
        assert_eq!(results[1], None);
        assert_eq!(results[2], Some(11.25));
        assert_eq!(results[3], Some(12.125));
        assert_eq!(results[4], Some(13.0625));
    }

    #[test]
    fn test_ema_constant_series() {
        let bars = flat_bars(&[7.0; 6]);
        let results = Ema::new(4).calculate(&bars);
        assert!(results[3..].iter().all(|v| *v == Some(7.0)));
    }

    #[test]
    fn test_ema_insufficient_data() {
        let bars = flat_bars(&[1.0, 2.0]);
        assert_eq!(Ema::new(3).calculate(&bars), vec![None, None]);
    }
}
