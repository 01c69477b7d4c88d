// Relative Strength Index (RSI) indicator implementation
use super::{closes, rolling, IndicatorCalculator};
use serde_json::Value;
use shared::models::Bar;

/// RSI from simple rolling means of gains and losses over `period` deltas.
///
/// The first value appears at index `period`, since `period` deltas need
/// `period + 1` closes. A window without losses saturates at 100; a window
/// with neither gains nor losses reads 50.
pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

pub(crate) fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Bar]) -> Vec<Option<f64>> {
        if data.len() <= self.period || self.period == 0 {
            return vec![None; data.len()];
        }

        let closes = closes(data);
        let (gains, losses): (Vec<f64>, Vec<f64>) = closes
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                }
            })
            .unzip();

        let avg_gains = rolling::rolling_mean(&gains, self.period);
        let avg_losses = rolling::rolling_mean(&losses, self.period);

        // deltas are offset by one from bars
        let mut results = vec![None];
        results.extend(
            avg_gains
                .into_iter()
                .zip(avg_losses)
                .map(|pair| match pair {
                    (Some(g), Some(l)) => Some(rsi_from_averages(g, l)),
                    _ => None,
                }),
        );
        results
    }
}
