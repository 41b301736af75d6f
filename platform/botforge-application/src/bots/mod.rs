use botforge_domain::entities::bot::BotRecord;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::bots::{BotPatch, BotRepository, NewBot};

pub const MAX_BOT_NAME_CHARS: usize = 100;

pub fn create_bot(repo: &dyn BotRepository, new_bot: NewBot) -> Result<BotRecord, BotforgeError> {
    validate_name(&new_bot.name)?;
    if new_bot.code.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "bot code must not be empty".to_string(),
        ));
    }
    let record = repo.create(new_bot)?;
    metrics::counter!("botforge.bots.created_total").increment(1);
    Ok(record)
}

pub fn get_bot(repo: &dyn BotRepository, id: u64) -> Result<BotRecord, BotforgeError> {
    repo.get(id)?
        .ok_or_else(|| BotforgeError::NotFound(format!("bot {id}")))
}

pub fn list_bots(repo: &dyn BotRepository) -> Result<Vec<BotRecord>, BotforgeError> {
    repo.list()
}

pub fn update_bot(
    repo: &dyn BotRepository,
    id: u64,
    patch: BotPatch,
) -> Result<BotRecord, BotforgeError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    repo.update(id, patch)?
        .ok_or_else(|| BotforgeError::NotFound(format!("bot {id}")))
}

pub fn delete_bot(repo: &dyn BotRepository, id: u64) -> Result<(), BotforgeError> {
    if repo.delete(id)? {
        Ok(())
    } else {
        Err(BotforgeError::NotFound(format!("bot {id}")))
    }
}

fn validate_name(name: &str) -> Result<(), BotforgeError> {
    if name.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "bot name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_BOT_NAME_CHARS {
        return Err(BotforgeError::InvalidParameter(format!(
            "bot name must not exceed {} characters",
            MAX_BOT_NAME_CHARS
        )));
    }
    Ok(())
}
