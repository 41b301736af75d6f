use botforge_domain::entities::bot::BotRecord;
use botforge_domain::entities::report::StoredResult;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::bots::{BotPatch, BotRepository, NewBot};
use botforge_domain::repositories::results::{NewResult, ResultQuery, ResultRepository};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Integer-keyed bot store. The mutex serializes concurrent writers; each
/// call owns the lock for the whole operation so ids never collide.
#[derive(Debug)]
pub struct MemoryBotRepository {
    table: Mutex<Table<BotRecord>>,
}

impl MemoryBotRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for MemoryBotRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BotRepository for MemoryBotRepository {
    fn create(&self, new_bot: NewBot) -> Result<BotRecord, BotforgeError> {
        let mut table = lock(&self.table, "bot store")?;
        let id = table.allocate_id();
        let now = Utc::now().to_rfc3339();
        let record = BotRecord {
            id,
            name: new_bot.name,
            indicators: new_bot.indicators,
            symbol: new_bot.symbol,
            timeframe: new_bot.timeframe,
            strategy_type: new_bot.strategy_type,
            code: new_bot.code,
            description: new_bot.description,
            created_at: now.clone(),
            updated_at: now,
        };
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: u64) -> Result<Option<BotRecord>, BotforgeError> {
        let table = lock(&self.table, "bot store")?;
        Ok(table.rows.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<BotRecord>, BotforgeError> {
        let table = lock(&self.table, "bot store")?;
        Ok(table.rows.values().cloned().collect())
    }

    fn update(&self, id: u64, patch: BotPatch) -> Result<Option<BotRecord>, BotforgeError> {
        let mut table = lock(&self.table, "bot store")?;
        let Some(record) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(description) = patch.description {
            record.description = Some(description);
        }
        if let Some(indicators) = patch.indicators {
            record.indicators = indicators;
        }
        if let Some(strategy_type) = patch.strategy_type {
            record.strategy_type = strategy_type;
        }
        record.updated_at = Utc::now().to_rfc3339();
        Ok(Some(record.clone()))
    }

    fn delete(&self, id: u64) -> Result<bool, BotforgeError> {
        let mut table = lock(&self.table, "bot store")?;
        Ok(table.rows.remove(&id).is_some())
    }
}

/// Integer-keyed store of persisted backtest reports.
#[derive(Debug)]
pub struct MemoryResultRepository {
    table: Mutex<Table<StoredResult>>,
}

impl MemoryResultRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for MemoryResultRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultRepository for MemoryResultRepository {
    fn save(&self, new_result: NewResult) -> Result<StoredResult, BotforgeError> {
        let mut table = lock(&self.table, "result store")?;
        let id = table.allocate_id();
        let stored = StoredResult {
            id,
            bot_id: new_result.bot_id,
            bot_name: new_result.bot_name,
            description: new_result.description,
            created_at: Utc::now().to_rfc3339(),
            report: new_result.report,
        };
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn get(&self, id: u64) -> Result<Option<StoredResult>, BotforgeError> {
        let table = lock(&self.table, "result store")?;
        Ok(table.rows.get(&id).cloned())
    }

    fn list(&self, query: &ResultQuery) -> Result<Vec<StoredResult>, BotforgeError> {
        let table = lock(&self.table, "result store")?;
        Ok(table
            .rows
            .values()
            .filter(|stored| match &query.symbol {
                Some(symbol) => &stored.report.symbol == symbol,
                None => true,
            })
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    fn delete(&self, id: u64) -> Result<bool, BotforgeError> {
        let mut table = lock(&self.table, "result store")?;
        Ok(table.rows.remove(&id).is_some())
    }
}

fn lock<'a, T>(
    table: &'a Mutex<Table<T>>,
    name: &str,
) -> Result<std::sync::MutexGuard<'a, Table<T>>, BotforgeError> {
    table
        .lock()
        .map_err(|_| BotforgeError::Storage(format!("{name} lock poisoned")))
}

#[cfg(test)]
mod tests {
    use super::{MemoryBotRepository, MemoryResultRepository};
    use botforge_domain::entities::report::{BacktestReport, ReportStatus};
    use botforge_domain::repositories::bots::{BotPatch, BotRepository, NewBot};
    use botforge_domain::repositories::results::{NewResult, ResultQuery, ResultRepository};

    fn new_bot(name: &str) -> NewBot {
        NewBot {
            name: name.to_string(),
            indicators: vec!["RSI".to_string()],
            symbol: "EURUSD".to_string(),
            timeframe: "H1".to_string(),
            strategy_type: "trend".to_string(),
            code: "int OnInit() { return INIT_SUCCEEDED; }".to_string(),
            description: None,
        }
    }

    fn report(symbol: &str) -> BacktestReport {
        BacktestReport {
            status: ReportStatus::Success,
            symbol: symbol.to_string(),
            timeframe: "H1".to_string(),
            period_years: 5,
            initial_capital: 10_000.0,
            final_capital: 10_500.0,
            total_return_pct: 5.0,
            sharpe_ratio: 1.0,
            max_drawdown_pct: -2.0,
            win_rate_pct: 60.0,
            profit_factor: 1.5,
            total_trades: 10,
            equity_curve: vec![10_000.0, 10_500.0],
            trades: Vec::new(),
            message: "backtest completed".to_string(),
        }
    }

    fn new_result(bot_name: &str, symbol: &str) -> NewResult {
        NewResult {
            bot_id: None,
            bot_name: bot_name.to_string(),
            description: None,
            report: report(symbol),
        }
    }

    #[test]
    fn bot_ids_start_at_one_and_increment() {
        let repo = MemoryBotRepository::new();
        let first = repo.create(new_bot("first")).expect("create succeeds");
        let second = repo.create(new_bot("second")).expect("create succeeds");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.created_at.is_empty());
    }

    #[test]
    fn bot_update_applies_only_provided_fields() {
        let repo = MemoryBotRepository::new();
        let created = repo.create(new_bot("original")).expect("create succeeds");

        let updated = repo
            .update(
                created.id,
                BotPatch {
                    name: Some("renamed".to_string()),
                    ..BotPatch::default()
                },
            )
            .expect("update succeeds")
            .expect("bot exists");

        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.strategy_type, "trend");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn bot_delete_reports_whether_it_existed() {
        let repo = MemoryBotRepository::new();
        let created = repo.create(new_bot("doomed")).expect("create succeeds");
        assert!(repo.delete(created.id).expect("delete succeeds"));
        assert!(!repo.delete(created.id).expect("delete succeeds"));
        assert!(repo.get(created.id).expect("get succeeds").is_none());
    }

    #[test]
    fn result_list_filters_by_symbol_before_paging() {
        let repo = MemoryResultRepository::new();
        for idx in 0..4 {
            let symbol = if idx % 2 == 0 { "EURUSD" } else { "SPY" };
            repo.save(new_result(&format!("bot{idx}"), symbol))
                .expect("save succeeds");
        }

        let eur = repo
            .list(&ResultQuery {
                limit: 10,
                offset: 0,
                symbol: Some("EURUSD".to_string()),
            })
            .expect("list succeeds");
        assert_eq!(eur.len(), 2);
        assert!(eur.iter().all(|stored| stored.report.symbol == "EURUSD"));

        let paged = repo
            .list(&ResultQuery {
                limit: 1,
                offset: 1,
                symbol: Some("EURUSD".to_string()),
            })
            .expect("list succeeds");
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].bot_name, "bot2");
    }
}
