use crate::entities::report::{BacktestReport, StoredResult};
use crate::errors::BotforgeError;

#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub bot_id: Option<u64>,
    pub bot_name: String,
    pub description: Option<String>,
    pub report: BacktestReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultQuery {
    pub limit: usize,
    pub offset: usize,
    pub symbol: Option<String>,
}

impl Default for ResultQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            symbol: None,
        }
    }
}

/// Integer-keyed store of persisted backtest reports.
pub trait ResultRepository {
    fn save(&self, new_result: NewResult) -> Result<StoredResult, BotforgeError>;
    fn get(&self, id: u64) -> Result<Option<StoredResult>, BotforgeError>;
    fn list(&self, query: &ResultQuery) -> Result<Vec<StoredResult>, BotforgeError>;
    fn delete(&self, id: u64) -> Result<bool, BotforgeError>;
}
