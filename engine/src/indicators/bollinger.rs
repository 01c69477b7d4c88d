// Bollinger Bands indicator implementation
use super::{closes, rolling};
use shared::models::{Bar, BollingerBands};

/// Middle band is the SMA of closes; the bands sit `multiplier` sample
/// standard deviations either side of it.
pub struct Bollinger {
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self { period, multiplier }
    }

    pub fn calculate(&self, data: &[Bar]) -> Vec<Option<BollingerBands>> {
        let closes = closes(data);
        let middle = rolling::rolling_mean(&closes, self.period);
        let std = rolling::rolling_std(&closes, self.period);

        middle
            .into_iter()
            .zip(std)
            .map(|pair| {
                let (middle, std) = match pair {
                    (Some(m), Some(s)) => (m, s),
                    _ => return None,
                };
                Some(BollingerBands {
                    upper: middle + self.multiplier * std,
                    middle,
                    lower: middle - self.multiplier * std,
                })
            })
            .collect()
    }
}
