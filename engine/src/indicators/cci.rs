// Commodity Channel Index (CCI) indicator implementation
use super::{is_negligible, rolling, IndicatorCalculator};
use serde_json::Value;
use shared::models::Bar;

const LAMBERT_CONSTANT: f64 = 0.015;

/// CCI over the typical price `(high + low + close) / 3`.
///
/// Mean deviation is taken against the window's own mean. A window whose
/// typical prices are all equal has no deviation and yields `None`.
pub struct Cci {
    name: String,
    period: usize,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("CCI({})", period),
            period,
        }
    }
}

pub fn typical_price(data: &[Bar]) -> Vec<f64> {
    data.iter().map(|b| (b.high + b.low + b.close) / 3.0).collect()
}

impl IndicatorCalculator for Cci {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        if self.period == 0 || data.len() < self.period {
            return vec![None; data.len()];
        }

        let tp = typical_price(data);
        let mut results = vec![None; self.period - 1];
        results.extend(tp.windows(self.period).map(|window| {
            let sma = rolling::mean(window)?;
            let mean_deviation = rolling::mean(
                &window.iter().map(|x| (x - sma).abs()).collect::<Vec<_>>(),
            )?;
            if is_negligible(mean_deviation, sma) {
                return None;
            }
            let current = *window.last()?;
            Some((current - sma) / (LAMBERT_CONSTANT * mean_deviation))
        }));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, banded_bars, flat_bars};

    #[test]
    fn test_cci_known_window() {
        // typical prices equal closes here: 1, 2, 3, 4 -> mean 2.5, MD 1.0
        let results = Cci::new(4).calculate(&flat_bars(&[1.0, 2.0, 3.0, 4.0]));
        assert!(results[..3].iter().all(Option::is_none));
        assert_close(results[3].unwrap(), 1.5 / 0.015, 1e-9);
    }

    #[test]
    fn test_cci_uptrend_strongly_positive() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let last = Cci::new(20).calculate(&banded_bars(&closes))[29].unwrap();
        // window 110..=129: mean 119.5, MD 5.0, (129 - 119.5) / 0.075
        assert_close(last, 9.5 / 0.075, 1e-9);
        assert!(last > 100.0);
    }

    #[test]
    fn test_cci_flat_window_is_undefined() {
        let results = Cci::new(20).calculate(&flat_bars(&[0.1; 25]));
        assert!(results.iter().all(Option::is_none));
    }
}
