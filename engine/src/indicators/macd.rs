// Moving Average Convergence Divergence (MACD) indicator implementation
use super::{closes, rolling};
use shared::models::{Bar, Macd};

/// MACD from adjust-free EMAs of closes.
///
/// The EMAs run from the first bar, but points are only reported once the
/// slow span is filled.
pub struct MacdCalculator {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdCalculator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    pub fn calculate(&self, data: &[Bar]) -> Vec<Option<Macd>> {
        let closes = closes(data);
        let fast = rolling::ema_span(&closes, self.fast);
        let slow = rolling::ema_span(&closes, self.slow);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = rolling::ema_span(&line, self.signal);

        line.into_iter()
            .zip(signal)
            .enumerate()
            .map(|(i, (macd, signal))| {
                if i + 1 < self.slow.max(1) {
                    None
                } else {
                    Some(Macd { macd, signal, histogram: macd - signal })
                }
            })
            .collect()
    }
}

impl Default for MacdCalculator {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}
