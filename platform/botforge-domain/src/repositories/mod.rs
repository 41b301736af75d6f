pub mod artifacts;
pub mod bots;
pub mod codegen;
pub mod market_data;
pub mod results;
