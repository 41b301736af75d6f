use crate::entities::bot::BotRecord;
use crate::errors::BotforgeError;

#[derive(Debug, Clone, PartialEq)]
pub struct NewBot {
    pub name: String,
    pub indicators: Vec<String>,
    pub symbol: String,
    pub timeframe: String,
    pub strategy_type: String,
    pub code: String,
    pub description: Option<String>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub indicators: Option<Vec<String>>,
    pub strategy_type: Option<String>,
}

/// Integer-keyed store of saved bots. Implementations assign ids and stamp
/// `created_at`/`updated_at`.
pub trait BotRepository {
    fn create(&self, new_bot: NewBot) -> Result<BotRecord, BotforgeError>;
    fn get(&self, id: u64) -> Result<Option<BotRecord>, BotforgeError>;
    fn list(&self) -> Result<Vec<BotRecord>, BotforgeError>;
    fn update(&self, id: u64, patch: BotPatch) -> Result<Option<BotRecord>, BotforgeError>;
    fn delete(&self, id: u64) -> Result<bool, BotforgeError>;
}
