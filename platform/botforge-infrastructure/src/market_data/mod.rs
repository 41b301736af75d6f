pub mod csv;
pub mod http;

use botforge_domain::errors::BotforgeError;
use chrono::DateTime;

/// Accepts RFC 3339 strings or plain epoch seconds.
pub(crate) fn parse_timestamp(value: &str) -> Result<i64, BotforgeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp());
    }
    if let Ok(epoch) = value.trim().parse::<i64>() {
        return Ok(epoch);
    }
    Err(BotforgeError::Provider(format!(
        "unrecognized timestamp: {value}"
    )))
}
