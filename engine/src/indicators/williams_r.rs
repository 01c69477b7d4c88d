// Williams %R indicator implementation
use super::{highs, is_negligible, lows, rolling, IndicatorCalculator};
use serde_json::Value;
use shared::models::Bar;

/// `(highest_high - close) / (highest_high - lowest_low) * -100` over the
/// trailing window. Undefined where the window has no range.
pub struct WilliamsR {
    name: String,
    period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("WilliamsR({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for WilliamsR {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        let highest = rolling::rolling_max(&highs(data), self.period);
        let lowest = rolling::rolling_min(&lows(data), self.period);

        data.iter()
            .zip(highest.into_iter().zip(lowest))
            .map(|(bar, window)| match window {
                (Some(hh), Some(ll)) if !is_negligible(hh - ll, hh) => {
                    Some((hh - bar.close) / (hh - ll) * -100.0)
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{bar_on, banded_bars, flat_bars};

    #[test]
    fn test_williams_r_close_at_high() {
        let bars = vec![
            bar_on(0, 10.0, 12.0, 8.0, 9.0, 0.0),
            bar_on(1, 9.0, 11.0, 9.0, 10.0, 0.0),
            bar_on(2, 10.0, 12.0, 10.0, 12.0, 0.0),
        ];
        let results = WilliamsR::new(3).calculate(&bars);
        assert!(results[..2].iter().all(Option::is_none));
        assert_eq!(results[2], Some(-0.0));
    }

    #[test]
    fn test_williams_r_midrange() {
        let bars = vec![
            bar_on(0, 10.0, 20.0, 10.0, 15.0, 0.0),
            bar_on(1, 15.0, 18.0, 12.0, 15.0, 0.0),
        ];
        let results = WilliamsR::new(2).calculate(&bars);
        assert_eq!(results[1], Some(-50.0));
    }

    #[test]
    fn test_williams_r_uptrend_near_zero() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let last = WilliamsR::new(14).calculate(&banded_bars(&closes))[29].unwrap();
        // HH = 130, LL = 115, close = 129
        assert!((last - (-100.0 / 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_williams_r_flat_window_is_undefined() {
        let results = WilliamsR::new(14).calculate(&flat_bars(&[5.0; 20]));
        assert!(results.iter().all(Option::is_none));
    }
}
