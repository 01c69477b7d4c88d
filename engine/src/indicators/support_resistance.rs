// Support / resistance levels over the trailing window
use shared::models::{Bar, SupportResistance};

/// Support and resistance are the extreme closes of the last `period` bars;
/// the pivot averages the window's extreme high, extreme low and the last close.
pub fn support_resistance(data: &[Bar], period: usize) -> Option<SupportResistance> {
    if period == 0 || data.len() < period {
        return None;
    }
    let window = &data[data.len() - period..];
    let last_close = window.last()?.close;

    let (support, resistance, max_high, min_low) = window.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY),
        |(support, resistance, max_high, min_low), bar| {
            (
                support.min(bar.close),
                resistance.max(bar.close),
                max_high.max(bar.high),
                min_low.min(bar.low),
            )
        },
    );

    Some(SupportResistance {
        support,
        resistance,
        pivot_point: (max_high + min_low + last_close) / 3.0,
    })
}
