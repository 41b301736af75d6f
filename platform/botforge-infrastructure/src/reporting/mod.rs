use botforge_domain::entities::report::BacktestReport;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::artifacts::ArtifactWriter;
use botforge_domain::value_objects::trade::Trade;
use std::fs;
use std::fs::File;
use std::path::Path;

/// Writes run artifacts to the local filesystem.
pub struct FsArtifactWriter;

impl ArtifactWriter for FsArtifactWriter {
    fn ensure_dir(&self, path: &Path) -> Result<(), BotforgeError> {
        fs::create_dir_all(path).map_err(|err| {
            BotforgeError::Storage(format!("failed to create {}: {}", path.display(), err))
        })
    }

    fn write_report_json(&self, path: &Path, report: &BacktestReport) -> Result<(), BotforgeError> {
        let json = serde_json::to_string_pretty(report).map_err(|err| {
            BotforgeError::Storage(format!("failed to serialize report: {err}"))
        })?;
        fs::write(path, json).map_err(|err| {
            BotforgeError::Storage(format!("failed to write {}: {}", path.display(), err))
        })
    }

    fn write_trades_csv(&self, path: &Path, trades: &[Trade]) -> Result<(), BotforgeError> {
        let file = File::create(path).map_err(|err| {
            BotforgeError::Storage(format!("failed to create {}: {}", path.display(), err))
        })?;
        let mut writer = csv::Writer::from_writer(file);
        for trade in trades {
            writer.serialize(trade).map_err(|err| {
                BotforgeError::Storage(format!("failed to write trade row: {err}"))
            })?;
        }
        writer
            .flush()
            .map_err(|err| BotforgeError::Storage(format!("failed to flush {}: {}", path.display(), err)))
    }

    fn write_equity_csv(&self, path: &Path, equity_curve: &[f64]) -> Result<(), BotforgeError> {
        let file = File::create(path).map_err(|err| {
            BotforgeError::Storage(format!("failed to create {}: {}", path.display(), err))
        })?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(["step", "equity"])
            .map_err(|err| BotforgeError::Storage(format!("failed to write header: {err}")))?;
        for (step, equity) in equity_curve.iter().enumerate() {
            writer
                .write_record([step.to_string(), equity.to_string()])
                .map_err(|err| {
                    BotforgeError::Storage(format!("failed to write equity row: {err}"))
                })?;
        }
        writer
            .flush()
            .map_err(|err| BotforgeError::Storage(format!("failed to flush {}: {}", path.display(), err)))
    }
}
