use super::parse_timestamp;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::market_data::{MarketDataProvider, SeriesQuery};
use botforge_domain::value_objects::bar::PriceBar;
use chrono::Utc;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
struct BarPayload {
    timestamp_utc: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

#[derive(Debug, Deserialize)]
struct SeriesPayload {
    bars: Vec<BarPayload>,
}

/// Blocking client for the bar-history provider. The request window is
/// `[now - 365 * period_years days, now]`; the engine timeframe label is
/// translated to the provider's interval grammar.
pub struct HttpMarketDataProvider {
    base_url: String,
    client: Client,
}

impl HttpMarketDataProvider {
    pub fn new(base_url: String, timeout_ms: u64) -> Result<Self, BotforgeError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|err| {
                BotforgeError::Provider(format!("failed to build http client: {err}"))
            })?;
        Ok(Self { base_url, client })
    }
}

impl MarketDataProvider for HttpMarketDataProvider {
    fn acquire_series(&self, query: &SeriesQuery) -> Result<Vec<PriceBar>, BotforgeError> {
        let span = tracing::info_span!(
            "infra.http.acquire_series",
            symbol = %query.symbol,
            timeframe = %query.timeframe
        );
        let _enter = span.enter();

        let interval = provider_interval(&query.timeframe);
        let end = Utc::now();
        let start = end - chrono::Duration::days(365 * i64::from(query.period_years));

        let endpoint = format!("{}/v1/bars", self.base_url.trim_end_matches('/'));
        let request_start = Instant::now();
        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("symbol", query.symbol.clone()),
                ("interval", interval.to_string()),
                ("start", start.to_rfc3339()),
                ("end", end.to_rfc3339()),
            ])
            .send()
            .map_err(|err| {
                metrics::counter!("botforge.provider.http.errors_total", "stage" => "send")
                    .increment(1);
                tracing::error!(error = %err, "provider request failed");
                BotforgeError::Provider(format!("provider request failed: {err}"))
            })?;

        if !response.status().is_success() {
            metrics::counter!("botforge.provider.http.errors_total", "stage" => "status")
                .increment(1);
            return Err(BotforgeError::Provider(format!(
                "provider http error: status {}",
                response.status().as_u16()
            )));
        }

        let payload: SeriesPayload = response.json().map_err(|err| {
            metrics::counter!("botforge.provider.http.errors_total", "stage" => "parse")
                .increment(1);
            BotforgeError::Provider(format!("failed to parse provider response: {err}"))
        })?;
        metrics::histogram!("botforge.provider.http.fetch_ms")
            .record(request_start.elapsed().as_millis() as f64);

        let mut bars = Vec::with_capacity(payload.bars.len());
        for record in payload.bars {
            if !record.close.is_finite() || record.close <= 0.0 {
                continue;
            }
            bars.push(PriceBar {
                timestamp: parse_timestamp(&record.timestamp_utc)?,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
            });
        }
        bars.sort_by_key(|bar| bar.timestamp);
        bars.dedup_by_key(|bar| bar.timestamp);

        if bars.is_empty() {
            return Err(BotforgeError::NoData(format!(
                "no price data available for {}",
                query.symbol
            )));
        }

        metrics::gauge!("botforge.provider.http.rows").set(bars.len() as f64);
        Ok(bars)
    }
}

/// Maps engine timeframe labels to the provider's interval strings.
/// Unknown labels fall back to daily bars.
pub fn provider_interval(timeframe: &str) -> &'static str {
    match timeframe.trim().to_uppercase().as_str() {
        "M1" => "1m",
        "M5" => "5m",
        "M15" => "15m",
        "M30" => "30m",
        "H1" => "1h",
        "H4" => "4h",
        "D1" => "1d",
        "W1" => "1wk",
        "MN" => "1mo",
        _ => "1d",
    }
}
