pub mod codegen;
pub mod market_data;
pub mod persistence;
pub mod reporting;
