use crate::value_objects::trade::Trade;
use serde::{Deserialize, Serialize};

/// Annualization for the Sharpe ratio. The step returns are treated as
/// daily samples regardless of the timeframe the series was built from.
pub const ANNUALIZATION_FACTOR: f64 = 252.0;

/// Summary statistics for one run. The five percentage/ratio fields are
/// rounded to two decimals; `final_capital` keeps full precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    pub final_capital: f64,
}

/// Derives the summary statistics from a trade ledger and equity curve.
///
/// Pure function: same inputs always produce bit-identical output, so the
/// summary can be recomputed from a stored ledger at any time.
pub fn calculate(trades: &[Trade], equity_curve: &[f64], initial_capital: f64) -> MetricsSummary {
    let final_capital = equity_curve.last().copied().unwrap_or(initial_capital);

    let total_return_pct = if equity_curve.is_empty() || initial_capital <= 0.0 {
        0.0
    } else {
        (final_capital - initial_capital) / initial_capital * 100.0
    };

    MetricsSummary {
        total_return_pct: round2(total_return_pct),
        sharpe_ratio: round2(sharpe_ratio(equity_curve)),
        max_drawdown_pct: round2(max_drawdown_pct(equity_curve)),
        win_rate_pct: round2(win_rate_pct(trades)),
        profit_factor: round2(profit_factor(trades)),
        final_capital,
    }
}

fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let mut returns = Vec::with_capacity(equity_curve.len() - 1);
    for pair in equity_curve.windows(2) {
        let prev = pair[0];
        if prev > 0.0 {
            returns.push(pair[1] / prev - 1.0);
        }
    }
    if returns.is_empty() {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns
        .iter()
        .map(|ret| {
            let diff = ret - mean;
            diff * diff
        })
        .sum::<f64>()
        / returns.len() as f64;
    let std = variance.sqrt();

    if std == 0.0 {
        0.0
    } else {
        mean / std * ANNUALIZATION_FACTOR.sqrt()
    }
}

fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    let mut running_max = f64::MIN;
    let mut max_drawdown = 0.0f64;

    for &equity in equity_curve {
        if equity > running_max {
            running_max = equity;
        }
        let drawdown = (equity - running_max) / running_max * 100.0;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}

fn win_rate_pct(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|trade| trade.profit > 0.0).count();
    wins as f64 / trades.len() as f64 * 100.0
}

fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }

    let total_wins: f64 = trades
        .iter()
        .filter(|trade| trade.profit > 0.0)
        .map(|trade| trade.profit)
        .sum();
    let total_losses: f64 = trades
        .iter()
        .filter(|trade| trade.profit < 0.0)
        .map(|trade| trade.profit)
        .sum::<f64>()
        .abs();

    if total_losses > 0.0 {
        total_wins / total_losses
    } else if total_wins > 0.0 {
        // No losers: report the finite win total rather than an infinity.
        total_wins
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{calculate, MetricsSummary};
    use crate::value_objects::trade::Trade;

    fn trade(profit: f64) -> Trade {
        Trade {
            entry_timestamp: 0,
            exit_timestamp: 1,
            entry_price: 100.0,
            exit_price: 100.0,
            size: 1.0,
            profit,
            return_pct: 0.0,
        }
    }

    #[test]
    fn empty_inputs_produce_zeroed_summary() {
        let summary = calculate(&[], &[], 10_000.0);
        assert_eq!(
            summary,
            MetricsSummary {
                final_capital: 10_000.0,
                ..MetricsSummary::default()
            }
        );
    }

    #[test]
    fn flat_curve_has_zero_sharpe_and_drawdown() {
        let curve = vec![10_000.0; 6];
        let summary = calculate(&[], &curve, 10_000.0);
        assert_eq!(summary.sharpe_ratio, 0.0);
        assert_eq!(summary.max_drawdown_pct, 0.0);
        assert_eq!(summary.total_return_pct, 0.0);
    }

    #[test]
    fn total_return_reflects_last_equity_point() {
        let curve = vec![10_000.0, 10_500.0, 11_000.0];
        let summary = calculate(&[], &curve, 10_000.0);
        assert_eq!(summary.total_return_pct, 10.0);
        assert_eq!(summary.final_capital, 11_000.0);
    }

    #[test]
    fn drawdown_is_the_most_negative_excursion() {
        let curve = vec![10_000.0, 12_000.0, 9_000.0, 11_000.0];
        let summary = calculate(&[], &curve, 10_000.0);
        assert_eq!(summary.max_drawdown_pct, -25.0);
    }

    #[test]
    fn all_losing_trades_zero_win_rate_and_profit_factor() {
        let trades = vec![trade(-50.0), trade(-25.0)];
        let summary = calculate(&trades, &[10_000.0, 9_950.0, 9_925.0], 10_000.0);
        assert_eq!(summary.win_rate_pct, 0.0);
        assert_eq!(summary.profit_factor, 0.0);
    }

    #[test]
    fn profit_factor_without_losses_is_the_win_total() {
        let trades = vec![trade(100.0), trade(50.0)];
        let summary = calculate(&trades, &[10_000.0, 10_100.0, 10_150.0], 10_000.0);
        assert_eq!(summary.profit_factor, 150.0);
        assert_eq!(summary.win_rate_pct, 100.0);
    }

    #[test]
    fn mixed_trades_divide_wins_by_absolute_losses() {
        let trades = vec![trade(300.0), trade(-100.0), trade(-50.0)];
        let summary = calculate(&trades, &[10_000.0, 10_150.0], 10_000.0);
        assert_eq!(summary.profit_factor, 2.0);
        assert!((summary.win_rate_pct - 33.33).abs() < 1e-9);
    }

    #[test]
    fn outputs_are_rounded_to_two_decimals() {
        let curve = vec![10_000.0, 10_123.456];
        let summary = calculate(&[], &curve, 10_000.0);
        assert_eq!(summary.total_return_pct, 1.23);
        // final_capital keeps full precision.
        assert_eq!(summary.final_capital, 10_123.456);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let trades = vec![trade(300.0), trade(-120.0)];
        let curve = vec![10_000.0, 10_300.0, 10_180.0];
        let first = calculate(&trades, &curve, 10_000.0);
        let second = calculate(&trades, &curve, 10_000.0);
        assert_eq!(first, second);
    }
}
