// KDJ (stochastic) indicator implementation
use super::{highs, is_negligible, lows, rolling};
use shared::models::{Bar, Kdj};

const SMOOTHING: f64 = 1.0 / 3.0;

/// RSV over the trailing `period` high/low range, smoothed into K and D with
/// `alpha = 1/3`, and `J = 3K - 2D`.
///
/// RSV is undefined for a window without range. K is seeded at the first
/// defined RSV and D at the first K; later undefined RSVs hold both lines.
pub struct KdjCalculator {
    period: usize,
}

impl KdjCalculator {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn rsv(&self, data: &[Bar]) -> Vec<Option<f64>> {
        let highest = rolling::rolling_max(&highs(data), self.period);
        let lowest = rolling::rolling_min(&lows(data), self.period);

        data.iter()
            .zip(highest.into_iter().zip(lowest))
            .map(|(bar, window)| match window {
                (Some(hh), Some(ll)) if !is_negligible(hh - ll, hh) => {
                    Some(((bar.close - ll) / (hh - ll) * 100.0).clamp(0.0, 100.0))
                }
                _ => None,
            })
            .collect()
    }

    pub fn calculate(&self, data: &[Bar]) -> Vec<Option<Kdj>> {
        let k = rolling::ema_opt(&self.rsv(data), SMOOTHING);
        let d = rolling::ema_opt(&k, SMOOTHING);

        k.into_iter()
            .zip(d)
            .map(|pair| match pair {
                (Some(k), Some(d)) => Some(Kdj { k, d, j: 3.0 * k - 2.0 * d }),
                _ => None,
            })
            .collect()
    }
}
