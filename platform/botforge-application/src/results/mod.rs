use botforge_domain::entities::report::StoredResult;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::results::{NewResult, ResultQuery, ResultRepository};
use serde::Serialize;

pub fn save_result(
    repo: &dyn ResultRepository,
    new_result: NewResult,
) -> Result<StoredResult, BotforgeError> {
    if new_result.bot_name.trim().is_empty() {
        return Err(BotforgeError::InvalidParameter(
            "bot name must not be empty".to_string(),
        ));
    }
    let stored = repo.save(new_result)?;
    metrics::counter!("botforge.results.saved_total").increment(1);
    Ok(stored)
}

pub fn get_result(repo: &dyn ResultRepository, id: u64) -> Result<StoredResult, BotforgeError> {
    repo.get(id)?
        .ok_or_else(|| BotforgeError::NotFound(format!("result {id}")))
}

pub fn list_results(
    repo: &dyn ResultRepository,
    query: &ResultQuery,
) -> Result<Vec<StoredResult>, BotforgeError> {
    repo.list(query)
}

pub fn delete_result(repo: &dyn ResultRepository, id: u64) -> Result<(), BotforgeError> {
    if repo.delete(id)? {
        Ok(())
    } else {
        Err(BotforgeError::NotFound(format!("result {id}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestResult {
    pub id: u64,
    pub bot_name: String,
    pub symbol: String,
    pub total_return_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_results: usize,
    pub avg_return: f64,
    pub avg_sharpe: f64,
    pub best_result: Option<BestResult>,
}

/// Aggregates over every stored result: mean return, mean Sharpe, and the
/// best run by total return. Means are rounded to two decimals.
pub fn summary_stats(repo: &dyn ResultRepository) -> Result<SummaryStats, BotforgeError> {
    let all = repo.list(&ResultQuery {
        limit: usize::MAX,
        offset: 0,
        symbol: None,
    })?;

    if all.is_empty() {
        return Ok(SummaryStats::default());
    }

    let count = all.len() as f64;
    let avg_return = all
        .iter()
        .map(|stored| stored.report.total_return_pct)
        .sum::<f64>()
        / count;
    let avg_sharpe = all
        .iter()
        .map(|stored| stored.report.sharpe_ratio)
        .sum::<f64>()
        / count;

    let best = all.iter().fold(None::<&StoredResult>, |best, candidate| {
        match best {
            Some(current) if current.report.total_return_pct >= candidate.report.total_return_pct => {
                Some(current)
            }
            _ => Some(candidate),
        }
    });

    Ok(SummaryStats {
        total_results: all.len(),
        avg_return: round2(avg_return),
        avg_sharpe: round2(avg_sharpe),
        best_result: best.map(|stored| BestResult {
            id: stored.id,
            bot_name: stored.bot_name.clone(),
            symbol: stored.report.symbol.clone(),
            total_return_pct: stored.report.total_return_pct,
        }),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
