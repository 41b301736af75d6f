use crate::value_objects::position::Position;
use crate::value_objects::side::Side;
use crate::value_objects::signal::Signal;
use crate::value_objects::trade::Trade;

/// Fraction of current cash committed when a position opens.
pub const CAPITAL_ALLOCATION: f64 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<f64>,
}

/// Replays signals against the account, one open long position at a time.
///
/// Signals are processed strictly in input order. A SELL while flat and a
/// BUY while long are no-ops, so the simulator is total: it never fails
/// mid-run. Opening a position does not debit cash; commitment shows up
/// through the mark-to-market term of the equity curve. One equity entry is
/// appended per processed signal, after the initial-capital seed, marking an
/// open position to the current signal's price. A trailing unmatched BUY
/// stays open forever and never becomes a realized trade.
pub fn simulate(signals: &[Signal], initial_capital: f64, commission_rate: f64) -> SimulationOutcome {
    let mut trades: Vec<Trade> = Vec::new();
    let mut equity_curve = Vec::with_capacity(signals.len() + 1);
    equity_curve.push(initial_capital);

    let mut cash = initial_capital;
    let mut position: Option<Position> = None;

    for signal in signals {
        match signal.side {
            Side::Buy => {
                if position.is_none() {
                    position = Some(Position {
                        entry_price: signal.price,
                        entry_timestamp: signal.timestamp,
                        size: cash * CAPITAL_ALLOCATION / signal.price,
                    });
                }
            }
            Side::Sell => {
                if let Some(open) = position.take() {
                    let profit = (signal.price - open.entry_price) * open.size;
                    // Round trip: entry and exit both charged on exit notional.
                    let commission_cost = open.size * signal.price * commission_rate * 2.0;
                    let net_profit = profit - commission_cost;
                    let entry_notional = open.entry_price * open.size;
                    let return_pct = if entry_notional > 0.0 {
                        net_profit / entry_notional * 100.0
                    } else {
                        0.0
                    };

                    trades.push(Trade {
                        entry_timestamp: open.entry_timestamp,
                        exit_timestamp: signal.timestamp,
                        entry_price: open.entry_price,
                        exit_price: signal.price,
                        size: open.size,
                        profit: net_profit,
                        return_pct,
                    });
                    cash += net_profit;
                }
            }
        }

        let equity = match position.as_ref() {
            Some(open) => cash + (signal.price - open.entry_price) * open.size,
            None => cash,
        };
        equity_curve.push(equity);
    }

    SimulationOutcome {
        trades,
        equity_curve,
    }
}
