use serde::{Deserialize, Serialize};

/// A closed round-trip. Immutable once created; appended to the ledger in
/// signal order. `profit` is net of round-trip commission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "entry_date")]
    pub entry_timestamp: i64,
    #[serde(rename = "exit_date")]
    pub exit_timestamp: i64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub size: f64,
    pub profit: f64,
    pub return_pct: f64,
}
