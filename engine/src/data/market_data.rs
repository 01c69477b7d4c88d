// In-memory daily bar store, keyed by symbol
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use shared::models::Bar;
use std::collections::{BTreeMap, HashMap};

/// Holds daily bars per symbol, kept sorted and unique by date.
///
/// Loading bars for a date that is already present replaces the stored bar.
pub struct MarketDataStore {
    data: HashMap<String, BTreeMap<NaiveDate, Bar>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
        }
    }

    /// Merges `new_bars` into the symbol's series; returns the stored bar count.
    pub fn add_bars(&mut self, symbol: &str, new_bars: Vec<Bar>) -> Result<usize> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(anyhow!("Cannot store bars without a symbol"));
        }
        let series = self.data.entry(symbol.to_string()).or_default();
        for bar in new_bars {
            series.insert(bar.date, bar);
        }
        Ok(series.len())
    }

    /// Bars within the inclusive date range, ascending. `None` if the symbol is unknown.
    pub fn get_bars(&self, symbol: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<Vec<Bar>> {
        self.data.get(symbol).map(|series| {
            series
                .values()
                .filter(|b| from.map_or(true, |start| b.date >= start))
                .filter(|b| to.map_or(true, |end| b.date <= end))
                .copied()
                .collect()
        })
    }

    /// The last `count` bars, ascending. `None` if the symbol is unknown.
    pub fn tail(&self, symbol: &str, count: usize) -> Option<Vec<Bar>> {
        self.data.get(symbol).map(|series| {
            let mut bars: Vec<Bar> = series.values().rev().take(count).copied().collect();
            bars.reverse();
            bars
        })
    }

    /// Known symbols in lexical order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self, symbol: &str) -> usize {
        self.data.get(symbol).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn test_add_bars_sorts_and_replaces() {
        let mut store = MarketDataStore::new();
        store.add_bars("600519", vec![bar(3, 3.0), bar(1, 1.0)]).unwrap();
        let count = store.add_bars("600519", vec![bar(2, 2.0), bar(3, 30.0)]).unwrap();
        assert_eq!(count, 3);

        let bars = store.get_bars("600519", None, None).unwrap();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 30.0]);
    }

    #[test]
    fn test_get_bars_range() {
        let mut store = MarketDataStore::new();
        store.add_bars("AAPL", (1..=5).map(|d| bar(d, f64::from(d))).collect()).unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 1, 2);
        let to = NaiveDate::from_ymd_opt(2024, 1, 4);
        let bars = store.get_bars("AAPL", from, to).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 2.0);
        assert_eq!(bars[2].close, 4.0);
    }

    #[test]
    fn test_unknown_symbol() {
        let store = MarketDataStore::new();
        assert!(store.get_bars("NOPE", None, None).is_none());
        assert!(store.tail("NOPE", 10).is_none());
        assert_eq!(store.len("NOPE"), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_tail_keeps_ascending_order() {
        let mut store = MarketDataStore::new();
        store.add_bars("AAPL", (1..=5).map(|d| bar(d, f64::from(d))).collect()).unwrap();
        let closes: Vec<f64> = store.tail("AAPL", 2).unwrap().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![4.0, 5.0]);
        assert_eq!(store.tail("AAPL", 50).unwrap().len(), 5);
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let mut store = MarketDataStore::new();
        assert!(store.add_bars("  ", vec![bar(1, 1.0)]).is_err());
    }

    #[test]
    fn test_symbols_sorted() {
        let mut store = MarketDataStore::new();
        store.add_bars("TSLA", vec![bar(1, 1.0)]).unwrap();
        store.add_bars("AAPL", vec![bar(1, 1.0)]).unwrap();
        assert_eq!(store.symbols(), vec!["AAPL".to_string(), "TSLA".to_string()]);
    }
}
