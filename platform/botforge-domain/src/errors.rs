use thiserror::Error;

/// Failure taxonomy shared by the engine, its ports, and the use-case layer.
///
/// `InvalidParameter` rejects a request before the engine runs; everything
/// else is absorbed by the backtest orchestrator into an error report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotforgeError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("no data: {0}")]
    NoData(String),
    #[error("computation failed: {0}")]
    Computation(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("codegen error: {0}")]
    Codegen(String),
    #[error("not found: {0}")]
    NotFound(String),
}
