use crate::backtesting::BacktestRequest;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::market_data::{MarketDataProvider, SeriesQuery};
use botforge_domain::services::ohlcv::series_quality;
use tracing::info_span;

pub const MIN_PERIOD_YEARS: u32 = 1;
pub const MAX_PERIOD_YEARS: u32 = 20;

/// Request-boundary checks, run before the engine. A failure here is a
/// rejected request, not a failed run.
pub fn validate_request(request: &BacktestRequest) -> Result<(), BotforgeError> {
    if request.symbol.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "symbol must not be empty".to_string(),
        ));
    }
    if request.timeframe.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "timeframe must not be empty".to_string(),
        ));
    }
    if request.initial_capital <= 0.0 {
        return Err(BotforgeError::InvalidParameter(
            "initial capital must be greater than 0".to_string(),
        ));
    }
    if !(MIN_PERIOD_YEARS..=MAX_PERIOD_YEARS).contains(&request.period_years) {
        return Err(BotforgeError::InvalidParameter(format!(
            "period years must be between {} and {}",
            MIN_PERIOD_YEARS, MAX_PERIOD_YEARS
        )));
    }
    Ok(())
}

/// Acquires the series once and reports its structural health as JSON,
/// without running the engine.
pub fn preflight(
    provider: &dyn MarketDataProvider,
    request: &BacktestRequest,
) -> Result<serde_json::Value, BotforgeError> {
    let _span = info_span!(
        "preflight",
        symbol = %request.symbol,
        timeframe = %request.timeframe
    )
    .entered();

    validate_request(request)?;

    let bars = provider.acquire_series(&SeriesQuery {
        symbol: request.symbol.clone(),
        timeframe: request.timeframe.clone(),
        period_years: request.period_years,
    })?;
    let report = series_quality(&bars);

    metrics::gauge!("botforge.preflight.rows").set(report.rows as f64);
    metrics::gauge!("botforge.preflight.out_of_order").set(report.out_of_order as f64);
    metrics::gauge!("botforge.preflight.invalid_close").set(report.invalid_close as f64);

    Ok(serde_json::json!({
        "symbol": request.symbol,
        "timeframe": request.timeframe,
        "period_years": request.period_years,
        "rows": report.rows,
        "out_of_order": report.out_of_order,
        "duplicates": report.duplicates,
        "invalid_close": report.invalid_close,
        "first_timestamp": report.first_timestamp,
        "last_timestamp": report.last_timestamp,
        "clean": report.is_clean(),
    }))
}

#[cfg(test)]
mod tests {
    use super::validate_request;
    use crate::backtesting::BacktestRequest;
    use botforge_domain::errors::BotforgeError;

    fn request() -> BacktestRequest {
        BacktestRequest {
            symbol: "EURUSD".to_string(),
            timeframe: "H1".to_string(),
            period_years: 5,
            initial_capital: 10_000.0,
            commission: 0.0001,
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn rejects_empty_symbol_and_timeframe() {
        let mut bad = request();
        bad.symbol = "  ".to_string();
        assert!(matches!(
            validate_request(&bad),
            Err(BotforgeError::InvalidParameter(_))
        ));

        let mut bad = request();
        bad.timeframe = String::new();
        assert!(matches!(
            validate_request(&bad),
            Err(BotforgeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_non_positive_capital() {
        let mut bad = request();
        bad.initial_capital = 0.0;
        assert!(validate_request(&bad).is_err());
    }

    #[test]
    fn rejects_period_outside_bounds() {
        let mut bad = request();
        bad.period_years = 0;
        assert!(validate_request(&bad).is_err());

        bad.period_years = 21;
        assert!(validate_request(&bad).is_err());

        bad.period_years = 20;
        assert!(validate_request(&bad).is_ok());
    }
}
