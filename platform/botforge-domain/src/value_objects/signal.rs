use crate::value_objects::side::Side;
use serde::{Deserialize, Serialize};

/// One timestamped trade instruction. Signals are consumed in the order
/// supplied by the caller; the engine never reorders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(alias = "date")]
    pub timestamp: i64,
    #[serde(alias = "type")]
    pub side: Side,
    pub price: f64,
}
