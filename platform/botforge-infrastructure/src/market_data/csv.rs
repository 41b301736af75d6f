use super::parse_timestamp;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::market_data::{MarketDataProvider, SeriesQuery};
use botforge_domain::value_objects::bar::PriceBar;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp_utc: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// File-backed bar source for offline runs. Rows with non-finite or
/// non-positive closes are dropped; duplicates collapse to the last row and
/// the result is time-ordered.
pub struct CsvMarketDataProvider {
    path: PathBuf,
}

impl CsvMarketDataProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl MarketDataProvider for CsvMarketDataProvider {
    fn acquire_series(&self, query: &SeriesQuery) -> Result<Vec<PriceBar>, BotforgeError> {
        let bars = load_csv(&self.path)?;
        if bars.is_empty() {
            return Err(BotforgeError::NoData(format!(
                "no price data available for {} in {}",
                query.symbol,
                self.path.display()
            )));
        }
        Ok(bars)
    }
}

pub fn load_csv(path: &Path) -> Result<Vec<PriceBar>, BotforgeError> {
    let file = File::open(path).map_err(|err| {
        BotforgeError::Provider(format!(
            "failed to open OHLCV CSV {}: {}",
            path.display(),
            err
        ))
    })?;
    read_bars(file)
}

fn read_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>, BotforgeError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut bars_by_ts: BTreeMap<i64, PriceBar> = BTreeMap::new();

    for result in reader.deserialize::<CsvRecord>() {
        let record =
            result.map_err(|err| BotforgeError::Provider(format!("failed to parse CSV row: {err}")))?;
        if !record.close.is_finite() || record.close <= 0.0 {
            continue;
        }
        let timestamp = parse_timestamp(&record.timestamp_utc)?;
        bars_by_ts.insert(
            timestamp,
            PriceBar {
                timestamp,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
            },
        );
    }

    Ok(bars_by_ts.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::read_bars;

    #[test]
    fn orders_deduplicates_and_filters_rows() {
        let data = "\
timestamp_utc,open,high,low,close,volume
20,1.0,1.0,1.0,102.0,5.0
10,1.0,1.0,1.0,101.0,5.0
10,1.0,1.0,1.0,101.5,5.0
30,1.0,1.0,1.0,0.0,5.0
40,1.0,1.0,1.0,-3.0,5.0
";
        let bars = read_bars(data.as_bytes()).expect("csv should parse");

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, 10);
        // The later duplicate wins.
        assert_eq!(bars[0].close, 101.5);
        assert_eq!(bars[1].timestamp, 20);
    }

    #[test]
    fn accepts_rfc3339_timestamps() {
        let data = "\
timestamp_utc,open,high,low,close,volume
1970-01-01T00:01:00+00:00,1.0,1.0,1.0,100.0,1.0
";
        let bars = read_bars(data.as_bytes()).expect("csv should parse");
        assert_eq!(bars[0].timestamp, 60);
    }

    #[test]
    fn malformed_rows_fail_loudly() {
        let data = "\
timestamp_utc,open,high,low,close,volume
10,1.0,not-a-number,1.0,100.0,1.0
";
        assert!(read_bars(data.as_bytes()).is_err());
    }
}
