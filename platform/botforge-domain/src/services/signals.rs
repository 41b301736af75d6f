use crate::value_objects::bar::PriceBar;
use crate::value_objects::side::Side;
use crate::value_objects::signal::Signal;
use rand::rngs::StdRng;
use rand::seq::index;

/// Trades targeted when the caller does not configure a count.
pub const DEFAULT_DEMO_TRADES: usize = 50;

/// Synthesizes an alternating BUY/SELL signal sequence over the series.
///
/// Picks `min(target_trades, bars.len())` distinct bar indices uniformly
/// without replacement, sorts them ascending, and alternates sides starting
/// with BUY. Each signal carries the close and timestamp of its bar. The
/// random source is caller-supplied so a fixed seed reproduces the sequence.
pub fn demo_signals(bars: &[PriceBar], target_trades: usize, rng: &mut StdRng) -> Vec<Signal> {
    if bars.is_empty() {
        return Vec::new();
    }

    let count = target_trades.min(bars.len());
    let mut indices = index::sample(rng, bars.len(), count).into_vec();
    indices.sort_unstable();

    indices
        .iter()
        .enumerate()
        .map(|(position, &idx)| Signal {
            timestamp: bars[idx].timestamp,
            side: if position % 2 == 0 {
                Side::Buy
            } else {
                Side::Sell
            },
            price: bars[idx].close,
        })
        .collect()
}
