use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::Bar;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Accepted header names per field: plain English, then the data provider's
// Chinese column names.
mod columns {
    pub const DATE: &[&str] = &["date", "日期"];
    pub const OPEN: &[&str] = &["open", "开盘"];
    pub const HIGH: &[&str] = &["high", "最高"];
    pub const LOW: &[&str] = &["low", "最低"];
    pub const CLOSE: &[&str] = &["close", "收盘"];
    pub const VOLUME: &[&str] = &["volume", "成交量"];
}

pub mod daily_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    /// Parses `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYYMMDD`.
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        let s = s.trim();
        ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .ok_or_else(|| anyhow!("Failed to parse date '{}'", s))
    }

    /// Parses a plain decimal, tolerating `,` thousand separators.
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim().replace(',', "");
        let value: f64 = normalized
            .parse()
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Non-finite value '{}'", s));
        }
        Ok(value)
    }

}

pub struct BarCsvParser;

impl BarCsvParser {
    // Header: date,open,high,low,close,volume (any order, extra columns ignored)
    // Example Row: 2024-01-02,10.50,10.80,10.40,10.75,1250000
    pub fn load_bars_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<Bar>> {
        let path = file_path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open CSV file '{}'", path.display()))?;
        Self::parse_bars(BufReader::new(file))
    }

    pub fn parse_bars<R: Read>(reader: R) -> Result<Vec<Bar>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_idx = Self::column_index(&headers, columns::DATE)?;
        let open_idx = Self::column_index(&headers, columns::OPEN)?;
        let high_idx = Self::column_index(&headers, columns::HIGH)?;
        let low_idx = Self::column_index(&headers, columns::LOW)?;
        let close_idx = Self::column_index(&headers, columns::CLOSE)?;
        let volume_idx = Self::column_index(&headers, columns::VOLUME)?;

        let mut bars = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.with_context(|| format!("Error reading CSV record at line {}", line))?;

            let date = daily_format::parse_date(Self::get_field(&record, date_idx, "date", line)?)
                .with_context(|| format!("Error parsing 'date' at line {}", line))?;

            bars.push(Bar {
                date,
                open: Self::get_number(&record, open_idx, "open", line)?,
                high: Self::get_number(&record, high_idx, "high", line)?,
                low: Self::get_number(&record, low_idx, "low", line)?,
                close: Self::get_number(&record, close_idx, "close", line)?,
                volume: Self::get_number(&record, volume_idx, "volume", line)?,
            });
        }
        Ok(bars)
    }

    fn get_field<'a>(record: &'a StringRecord, pos: usize, name: &str, line: usize) -> Result<&'a str> {
        record
            .get(pos)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn get_number(record: &StringRecord, pos: usize, name: &str, line: usize) -> Result<f64> {
        daily_format::parse_decimal(Self::get_field(record, pos, name, line)?)
            .with_context(|| format!("Error parsing '{}' at line {}", name, line))
    }

    fn column_index(headers: &StringRecord, aliases: &[&str]) -> Result<usize> {
        headers
            .iter()
            .position(|header| aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias)))
            .ok_or_else(|| anyhow!("Missing '{}' column in CSV header", aliases[0]))
    }
}

/// Dates of bars that do not strictly follow their predecessor.
pub fn out_of_order_dates(bars: &[Bar]) -> Vec<NaiveDate> {
    bars.windows(2)
        .filter(|w| w[1].date <= w[0].date)
        .map(|w| w[1].date)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_bars_from_csv_valid_data() {
        let csv_content = "\
date,open,high,low,close,volume
2024-01-02,10.50,10.80,10.40,10.75,1250000
2024-01-03,10.75,11.00,10.60,10.90,\"1,300,000\"";
        let tmp_file = create_test_csv(csv_content);
        let bars = BarCsvParser::load_bars_from_csv(tmp_file.path()).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].open, 10.50);
        assert_eq!(bars[0].high, 10.80);
        assert_eq!(bars[0].low, 10.40);
        assert_eq!(bars[0].close, 10.75);
        assert_eq!(bars[0].volume, 1_250_000.0);
        assert_eq!(bars[1].volume, 1_300_000.0);
    }

    #[test]
    fn test_provider_headers_in_any_order() {
        let csv_content = "\
日期,开盘,收盘,最高,最低,成交量,成交额,涨跌幅
20240102,10.50,10.75,10.80,10.40,1250000,13400000.0,1.2";
        let bars = BarCsvParser::parse_bars(csv_content.as_bytes()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.75);
        assert_eq!(bars[0].high, 10.80);
        assert_eq!(bars[0].low, 10.40);
    }

    #[test]
    fn test_header_only() {
        let bars = BarCsvParser::parse_bars("date,open,high,low,close,volume\n".as_bytes()).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let result = BarCsvParser::parse_bars("date,open,high,low,close\n2024-01-02,1,1,1,1\n".as_bytes());
        assert!(result.unwrap_err().to_string().contains("Missing 'volume' column"));
    }

    #[test]
    fn test_missing_field() {
        let result = BarCsvParser::parse_bars("date,open,high,low,close,volume\n2024-01-02,1,1,1,,5\n".as_bytes());
        assert!(result.unwrap_err().to_string().contains("Missing 'close' field in CSV record at line 2"));
    }

    #[test]
    fn test_invalid_number() {
        let result = BarCsvParser::parse_bars("date,open,high,low,close,volume\n2024-01-02,abc,1,1,1,5\n".as_bytes());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Error parsing 'open' at line 2"));
        assert!(format!("{:#}", err).contains("Failed to parse decimal 'abc'"));
    }

    #[test]
    fn test_missing_file_keeps_io_error() {
        let err = BarCsvParser::load_bars_from_csv("non_existent_file.csv").unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_out_of_order_dates() {
        let csv_content = "\
date,open,high,low,close,volume
2024-01-03,1,1,1,1,1
2024-01-02,1,1,1,1,1
2024-01-04,1,1,1,1,1";
        let bars = BarCsvParser::parse_bars(csv_content.as_bytes()).unwrap();
        assert_eq!(out_of_order_dates(&bars), vec![NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()]);
    }
}
