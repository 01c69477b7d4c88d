// Simple Moving Average (SMA) indicator implementation
use super::{closes, rolling, IndicatorCalculator};
use serde_json::Value;
use shared::models::Bar;

/// Mean of the last `window` values of `series`, or `None` when the series is shorter.
pub fn simple_moving_average(series: &[f64], window: usize) -> Option<f64> {
    if window == 0 || series.len() < window {
        return None;
    }
    rolling::mean(&series[series.len() - window..])
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        rolling::rolling_mean(&closes(data), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::flat_bars;

    #[test]
    fn test_sma_calculation() {
        let bars = flat_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let results = Sma::new(3).calculate(&bars);
        assert_eq!(results, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let bars = flat_bars(&[1.0, 2.0]);
        assert_eq!(Sma::new(3).calculate(&bars), vec![None, None]);
    }

    #[test]
    fn test_sma_period_one() {
        let bars = flat_bars(&[1.0, 2.0, 3.0]);
        assert_eq!(Sma::new(1).calculate(&bars), vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_sma_period_zero_is_undefined() {
        let bars = flat_bars(&[1.0, 2.0, 3.0]);
        assert_eq!(Sma::new(0).calculate(&bars), vec![None; 3]);
    }

    #[test]
    fn test_sma_empty_data() {
        assert!(Sma::new(3).calculate(&[]).is_empty());
    }

    #[test]
    fn test_simple_moving_average_last_point() {
        let series = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        assert_eq!(simple_moving_average(&series, 5), Some(13.0));
        assert_eq!(simple_moving_average(&series, 7), None);
        assert_eq!(simple_moving_average(&series, 0), None);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(Sma::new(20).parameters(), serde_json::json!({ "period": 20 }));
        assert_eq!(Sma::new(20).name(), "SMA(20)");
    }
}
