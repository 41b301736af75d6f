/// An open long position. Lives only inside the simulation loop and is
/// destroyed when the matching SELL signal is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub entry_price: f64,
    pub entry_timestamp: i64,
    pub size: f64,
}
