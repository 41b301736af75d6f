use serde::{Deserialize, Serialize};

/// A saved strategy bot: the indicator recipe plus the generated source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRecord {
    pub id: u64,
    pub name: String,
    pub indicators: Vec<String>,
    pub symbol: String,
    pub timeframe: String,
    pub strategy_type: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
