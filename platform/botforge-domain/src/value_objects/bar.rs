use serde::{Deserialize, Serialize};

/// One OHLCV bar. The engine only reads `close`; the remaining fields travel
/// with the bar for adapters and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}
