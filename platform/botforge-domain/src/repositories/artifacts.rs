use crate::entities::report::BacktestReport;
use crate::errors::BotforgeError;
use crate::value_objects::trade::Trade;
use std::path::Path;

/// Sink for run outputs: the full report plus CSV views of the ledger and
/// equity curve.
pub trait ArtifactWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), BotforgeError>;
    fn write_report_json(&self, path: &Path, report: &BacktestReport) -> Result<(), BotforgeError>;
    fn write_trades_csv(&self, path: &Path, trades: &[Trade]) -> Result<(), BotforgeError>;
    fn write_equity_csv(&self, path: &Path, equity_curve: &[f64]) -> Result<(), BotforgeError>;
}
