// Trailing, right-aligned window primitives.
//
// Every function returns a series with the same length as its input. Position
// `t` is `Some` only when the window `[t - window + 1, t]` is fully populated.

/// Rolling arithmetic mean over a dense series.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || values.len() < window {
        return vec![None; values.len()];
    }

    // Each window is summed afresh so an all-zero window reads exactly zero.
    let mut results = vec![None; window - 1];
    results.extend(values.windows(window).map(mean));
    results
}

/// Rolling sample standard deviation (N - 1 denominator).
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|t| {
            if t + 1 < window {
                None
            } else {
                sample_std(&values[t + 1 - window..=t])
            }
        })
        .collect()
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_fold(values, window, f64::max)
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_fold(values, window, f64::min)
}

fn rolling_fold(values: &[f64], window: usize, f: fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|t| {
            if t + 1 < window {
                None
            } else {
                values[t + 1 - window..=t].iter().copied().reduce(f)
            }
        })
        .collect()
}

/// Adjust-free exponential moving average: `y[t] = y[t-1] + alpha * (x[t] - y[t-1])`.
///
/// The recursion is seeded at the first defined input. Undefined inputs after
/// the seed carry the previous value forward.
pub fn ema_opt(values: &[Option<f64>], alpha: f64) -> Vec<Option<f64>> {
    let mut previous: Option<f64> = None;
    values
        .iter()
        .map(|value| {
            previous = match (previous, *value) {
                (None, x) => x,
                (Some(prev), Some(x)) => Some(prev + alpha * (x - prev)),
                (Some(prev), None) => Some(prev),
            };
            previous
        })
        .collect()
}

/// Adjust-free EMA over a dense series with the conventional span smoothing
/// `alpha = 2 / (span + 1)`.
pub fn ema_span(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    if let Some(&first) = iter.next() {
        let mut previous = first;
        results.push(previous);
        for &x in iter {
            previous += alpha * (x - previous);
            results.push(previous);
        }
    }
    results
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (N - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Value at the last position of a series, flattening undefined positions.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean_min_periods() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_rolling_mean_window_larger_than_series() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 3), vec![None, None]);
        assert!(rolling_mean(&[], 3).is_empty());
    }

    #[test]
    fn test_rolling_std_sample_denominator() {
        // mean 5, squared deviations sum 32 over the classic 8-value set, N-1 = 7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&values, 8);
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((out[7].unwrap() - expected).abs() < 1e-12);
        assert!(out[..7].iter().all(Option::is_none));
    }

    #[test]
    fn test_rolling_extremes() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(rolling_max(&values, 3), vec![None, None, Some(4.0), Some(4.0), Some(5.0)]);
        assert_eq!(rolling_min(&values, 3), vec![None, None, Some(1.0), Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_ema_span_seeded_at_first_value() {
        // span 3 -> alpha 0.5
        let out = ema_span(&[10.0, 12.0, 14.0], 3);
        assert_eq!(out, vec![10.0, 11.0, 12.5]);
    }

    #[test]
    fn test_ema_opt_carries_forward_gaps() {
        let out = ema_opt(&[None, Some(30.0), None, Some(60.0)], 1.0 / 3.0);
        assert_eq!(out[0], None);
        assert_eq!(out[1], Some(30.0));
        assert_eq!(out[2], Some(30.0));
        assert!((out[3].unwrap() - 40.0).abs() < 1e-12);
    }
}
