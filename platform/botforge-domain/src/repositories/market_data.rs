use crate::errors::BotforgeError;
use crate::value_objects::bar::PriceBar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub symbol: String,
    pub timeframe: String,
    pub period_years: u32,
}

/// Source of historical bars. Implementations return a time-ordered series
/// and fail with `BotforgeError::NoData` when nothing is available for the
/// query.
pub trait MarketDataProvider {
    fn acquire_series(&self, query: &SeriesQuery) -> Result<Vec<PriceBar>, BotforgeError>;
}
