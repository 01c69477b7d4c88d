// Price and volume statistics evaluated at the last bar.
use super::rolling;

/// `(absolute, percent)` change between the last two values.
///
/// The percent change is `None` when the previous value is zero.
pub fn price_change(closes: &[f64]) -> Option<(f64, Option<f64>)> {
    let [.., previous, current] = closes else {
        return None;
    };
    let change = current - previous;
    let pct = (*previous != 0.0).then(|| change / previous * 100.0);
    Some((change, pct))
}

/// Simple daily returns `close[t] / close[t-1] - 1`.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Sample standard deviation of the last `window` daily returns, in percent.
/// Needs `window + 1` closes.
pub fn volatility(closes: &[f64], window: usize) -> Option<f64> {
    if window < 2 || closes.len() < window + 1 {
        return None;
    }
    let returns = daily_returns(&closes[closes.len() - window - 1..]);
    rolling::sample_std(&returns).map(|s| s * 100.0)
}

/// Last volume relative to its trailing average; 1.0 when the average is
/// missing or not positive.
pub fn volume_ratio(current_volume: f64, average_volume: Option<f64>) -> f64 {
    match average_volume {
        Some(avg) if avg > 0.0 => current_volume / avg,
        _ => 1.0,
    }
}

/// Highest and lowest of the last `window` values.
pub fn window_extremes(values: &[f64], window: usize) -> Option<(f64, f64)> {
    if window == 0 || values.len() < window {
        return None;
    }
    values[values.len() - window..]
        .iter()
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((hi, lo)) => Some((f64::max(hi, v), f64::min(lo, v))),
        })
}
