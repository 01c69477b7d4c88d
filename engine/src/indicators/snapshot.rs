// Point-in-time indicator snapshot for one instrument.
use super::{
    closes, rolling, sma::simple_moving_average, stats, support_resistance, Atr, Bollinger, Cci,
    IndicatorCalculator, KdjCalculator, MacdCalculator, Rsi, WilliamsR,
};
use shared::models::{Bar, BollingerBands, IndicatorSnapshot, Kdj, Macd, SupportResistance};
use shared::utils::{round2, round4};

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const WILLIAMS_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;
pub const CCI_PERIOD: usize = 20;
pub const KDJ_PERIOD: usize = 9;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const LOOKBACK_20D: usize = 20;

/// Computes indicator snapshots from a daily bar series.
///
/// The engine holds no state: the same input always produces the same
/// snapshot, and it may be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Evaluates every indicator at the last bar of `bars`.
    ///
    /// `bars` must be sorted ascending by date with finite values. Indicators
    /// whose window is not yet filled are left as `None`.
    pub fn compute(bars: &[Bar]) -> IndicatorSnapshot {
        debug_assert!(
            bars.windows(2).all(|w| w[0].date < w[1].date),
            "bars must be strictly ascending by date"
        );
        debug_assert!(
            bars.iter().all(|b| [b.open, b.high, b.low, b.close, b.volume]
                .iter()
                .all(|v| v.is_finite())),
            "bar values must be finite"
        );

        let mut snapshot = Self::basic_statistics(bars);
        Self::fill_advanced(bars, &mut snapshot);

        tracing::trace!(bars = bars.len(), "computed indicator snapshot");
        snapshot
    }

    fn basic_statistics(bars: &[Bar]) -> IndicatorSnapshot {
        let Some(last) = bars.last() else {
            return IndicatorSnapshot::default();
        };
        let closes = closes(bars);
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let (price_change, price_change_pct) = match stats::price_change(&closes) {
            Some((change, pct)) => (Some(change), pct),
            None => (None, None),
        };
        // closes, not intraday highs/lows
        let extremes = stats::window_extremes(&closes, LOOKBACK_20D);
        let avg_volume_20d = simple_moving_average(&volumes, 20);

        IndicatorSnapshot {
            current_price: Some(last.close),
            ma5: simple_moving_average(&closes, 5),
            ma10: simple_moving_average(&closes, 10),
            ma20: simple_moving_average(&closes, 20),
            ma60: simple_moving_average(&closes, 60),
            price_change,
            price_change_pct,
            high_20d: extremes.map(|(high, _)| high),
            low_20d: extremes.map(|(_, low)| low),
            volatility_20d: stats::volatility(&closes, LOOKBACK_20D),
            avg_volume_5d: simple_moving_average(&volumes, 5),
            avg_volume_20d,
            volume_ratio: Some(stats::volume_ratio(last.volume, avg_volume_20d)),
            ..Default::default()
        }
    }

    fn fill_advanced(bars: &[Bar], snapshot: &mut IndicatorSnapshot) {
        snapshot.rsi_14 = last_value(&Rsi::new(RSI_PERIOD), bars).map(round2);
        snapshot.atr_14 = last_value(&Atr::new(ATR_PERIOD), bars).map(round2);
        snapshot.williams_r = last_value(&WilliamsR::new(WILLIAMS_PERIOD), bars).map(round2);
        snapshot.cci_20 = last_value(&Cci::new(CCI_PERIOD), bars).map(round2);

        snapshot.bollinger_bands = Bollinger::new(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER)
            .calculate(bars)
            .last()
            .copied()
            .flatten()
            .map(|b| BollingerBands {
                upper: round2(b.upper),
                middle: round2(b.middle),
                lower: round2(b.lower),
            });

        snapshot.kdj = KdjCalculator::new(KDJ_PERIOD)
            .calculate(bars)
            .last()
            .copied()
            .flatten()
            .map(|p| Kdj { k: round2(p.k), d: round2(p.d), j: round2(p.j) });

        if bars.len() >= MACD_SLOW {
            snapshot.macd = MacdCalculator::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
                .calculate(bars)
                .last()
                .copied()
                .flatten()
                .map(|p| {
                    let (macd, signal) = (round4(p.macd), round4(p.signal));
                    // histogram follows the reported line and signal
                    Macd { macd, signal, histogram: round4(macd - signal) }
                });
        }

        snapshot.support_resistance =
            support_resistance::support_resistance(bars, LOOKBACK_20D).map(|s| SupportResistance {
                support: round2(s.support),
                resistance: round2(s.resistance),
                pivot_point: round2(s.pivot_point),
            });
    }
}

fn last_value(calc: &dyn IndicatorCalculator, bars: &[Bar]) -> Option<f64> {
    rolling::last_defined(&calc.calculate(bars))
}
