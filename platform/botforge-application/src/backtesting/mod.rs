use botforge_domain::entities::report::{BacktestReport, ReportStatus};
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::market_data::{MarketDataProvider, SeriesQuery};
use botforge_domain::services::engine::metrics as engine_metrics;
use botforge_domain::services::engine::simulator;
use botforge_domain::services::signals;
use botforge_domain::value_objects::signal::Signal;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::info_span;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRequest {
    pub symbol: String,
    pub timeframe: String,
    pub period_years: u32,
    pub initial_capital: f64,
    pub commission: f64,
}

/// Runs one backtest end to end: acquire bars, synthesize demo signals when
/// none are supplied, simulate, derive the summary statistics.
///
/// Total function: every failure past the request boundary is absorbed into
/// an `error` report, so callers branch on `report.status` only.
pub fn run_backtest(
    provider: &dyn MarketDataProvider,
    request: &BacktestRequest,
    supplied_signals: Option<Vec<Signal>>,
    demo_trades: usize,
    rng: &mut StdRng,
) -> BacktestReport {
    let _span = info_span!(
        "run_backtest",
        symbol = %request.symbol,
        timeframe = %request.timeframe,
        period_years = request.period_years
    )
    .entered();

    match execute(provider, request, supplied_signals, demo_trades, rng) {
        Ok(report) => {
            metrics::counter!("botforge.backtest.runs_total", "result" => "ok").increment(1);
            report
        }
        Err(err) => {
            metrics::counter!("botforge.backtest.runs_total", "result" => "err").increment(1);
            tracing::warn!(error = %err, "backtest failed");
            error_report(request, err.to_string())
        }
    }
}

fn execute(
    provider: &dyn MarketDataProvider,
    request: &BacktestRequest,
    supplied_signals: Option<Vec<Signal>>,
    demo_trades: usize,
    rng: &mut StdRng,
) -> Result<BacktestReport, BotforgeError> {
    let stage_start = Instant::now();
    let bars = provider.acquire_series(&SeriesQuery {
        symbol: request.symbol.clone(),
        timeframe: request.timeframe.clone(),
        period_years: request.period_years,
    })?;
    metrics::histogram!("botforge.backtest.acquire_ms")
        .record(stage_start.elapsed().as_millis() as f64);

    if bars.is_empty() {
        return Err(BotforgeError::NoData(format!(
            "no price data available for {}",
            request.symbol
        )));
    }

    let signal_sequence = match supplied_signals {
        Some(signal_sequence) => signal_sequence,
        None => signals::demo_signals(&bars, demo_trades, rng),
    };

    let stage_start = Instant::now();
    let outcome = simulator::simulate(
        &signal_sequence,
        request.initial_capital,
        request.commission,
    );
    let summary =
        engine_metrics::calculate(&outcome.trades, &outcome.equity_curve, request.initial_capital);
    metrics::histogram!("botforge.backtest.engine_ms")
        .record(stage_start.elapsed().as_millis() as f64);
    metrics::gauge!("botforge.backtest.signals_processed").set(signal_sequence.len() as f64);
    metrics::gauge!("botforge.backtest.trades").set(outcome.trades.len() as f64);

    Ok(BacktestReport {
        status: ReportStatus::Success,
        symbol: request.symbol.clone(),
        timeframe: request.timeframe.clone(),
        period_years: request.period_years,
        initial_capital: request.initial_capital,
        final_capital: summary.final_capital,
        total_return_pct: summary.total_return_pct,
        sharpe_ratio: summary.sharpe_ratio,
        max_drawdown_pct: summary.max_drawdown_pct,
        win_rate_pct: summary.win_rate_pct,
        profit_factor: summary.profit_factor,
        total_trades: outcome.trades.len(),
        equity_curve: outcome.equity_curve,
        trades: outcome.trades,
        message: "backtest completed".to_string(),
    })
}

/// Error-shaped report: echoed request parameters, zeroed statistics, and
/// the diagnostic message.
pub fn error_report(request: &BacktestRequest, message: String) -> BacktestReport {
    BacktestReport {
        status: ReportStatus::Error,
        symbol: request.symbol.clone(),
        timeframe: request.timeframe.clone(),
        period_years: request.period_years,
        initial_capital: request.initial_capital,
        final_capital: 0.0,
        total_return_pct: 0.0,
        sharpe_ratio: 0.0,
        max_drawdown_pct: 0.0,
        win_rate_pct: 0.0,
        profit_factor: 0.0,
        total_trades: 0,
        equity_curve: Vec::new(),
        trades: Vec::new(),
        message,
    }
}
