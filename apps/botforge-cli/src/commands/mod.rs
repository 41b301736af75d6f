mod backtest;
mod common;
mod generate;
mod validate;

use std::path::PathBuf;

pub enum Command {
    Backtest {
        config: PathBuf,
        out: Option<PathBuf>,
        signals: Option<PathBuf>,
        seed: Option<u64>,
    },
    Validate {
        config: PathBuf,
    },
    Generate {
        config: PathBuf,
        indicators: Vec<String>,
        symbol: Option<String>,
        timeframe: Option<String>,
        strategy_type: String,
        out: Option<PathBuf>,
    },
    Refine {
        config: PathBuf,
        code: PathBuf,
        errors: PathBuf,
        out: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Backtest {
            config,
            out,
            signals,
            seed,
        } => backtest::run_backtest(config, out, signals, seed),
        Command::Validate { config } => validate::run_validate(config),
        Command::Generate {
            config,
            indicators,
            symbol,
            timeframe,
            strategy_type,
            out,
        } => generate::run_generate(config, indicators, symbol, timeframe, strategy_type, out),
        Command::Refine {
            config,
            code,
            errors,
            out,
        } => generate::run_refine(config, code, errors, out),
    }
}
