use crate::value_objects::trade::Trade;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Error,
}

/// The complete outcome of one backtest run: echoed request parameters,
/// summary statistics, the trade ledger, and the equity curve. An `error`
/// report carries zeroed statistics and the diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub status: ReportStatus,
    pub symbol: String,
    pub timeframe: String,
    pub period_years: u32,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    pub total_trades: usize,
    pub equity_curve: Vec<f64>,
    pub trades: Vec<Trade>,
    pub message: String,
}

/// A backtest report persisted in the result store, keyed by an integer id
/// assigned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub id: u64,
    pub bot_id: Option<u64>,
    pub bot_name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub report: BacktestReport,
}
