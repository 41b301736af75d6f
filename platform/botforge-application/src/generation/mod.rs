use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::codegen::{CodegenClient, CodegenRequest};
use tracing::info_span;

/// Generates strategy source for the given indicator recipe.
pub fn generate_code(
    client: &dyn CodegenClient,
    request: &CodegenRequest,
) -> Result<String, BotforgeError> {
    let _span = info_span!(
        "generate_code",
        symbol = %request.symbol,
        strategy_type = %request.strategy_type
    )
    .entered();

    if request.indicators.is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "at least one indicator is required".to_string(),
        ));
    }
    if request.symbol.trim().is_empty() || request.timeframe.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "symbol and timeframe must not be empty".to_string(),
        ));
    }
    if !strategy_catalog().contains(&request.strategy_type.as_str()) {
        tracing::warn!(
            strategy_type = %request.strategy_type,
            "strategy type not in the catalog; generating anyway"
        );
    }

    let code = client.generate(request)?;
    metrics::counter!("botforge.codegen.generated_total").increment(1);
    Ok(code)
}

/// Repairs strategy source from the compiler output of a failed build.
pub fn refine_code(
    client: &dyn CodegenClient,
    code: &str,
    compiler_errors: &str,
) -> Result<String, BotforgeError> {
    let _span = info_span!("refine_code").entered();

    if code.trim().is_empty() || compiler_errors.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "code and compiler errors must not be empty".to_string(),
        ));
    }

    let refined = client.refine(code, compiler_errors)?;
    metrics::counter!("botforge.codegen.refined_total").increment(1);
    Ok(refined)
}

/// Technical indicators the generator knows how to combine.
pub fn indicator_catalog() -> &'static [&'static str] {
    &[
        "ADX",
        "RSI",
        "MFI",
        "MA",
        "EMA",
        "MACD",
        "Bollinger",
        "CCI",
        "Stochastic",
        "ATR",
        "TEMA",
        "KDJ",
        "RVI",
        "Ichimoku",
        "PSAR",
    ]
}

pub fn strategy_catalog() -> &'static [&'static str] {
    &[
        "trend",
        "reversal",
        "breakout",
        "scalping",
        "arbitrage",
        "momentum",
        "ma_cross",
        "volatility",
        "divergence",
        "consolidation",
    ]
}

pub fn symbol_catalog() -> &'static [&'static str] {
    &[
        "EURUSD", "GBPUSD", "USDJPY", "USDCHF", "AUDUSD", "NZDUSD", "BTCUSD", "ETHUSD", "XRPUSD",
        "ADAUSD", "XAUUSD", "XAGUSD", "WTIUSD", "SPY", "QQQ", "IWM", "AAPL", "MSFT", "GOOGL",
        "AMZN", "TSLA", "META", "NVDA",
    ]
}

pub fn timeframe_catalog() -> &'static [&'static str] {
    &["M1", "M5", "M15", "M30", "H1", "H4", "D1", "W1", "MN"]
}
