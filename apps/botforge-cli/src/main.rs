mod commands;
mod infra;
mod obs;
mod output;

use clap::{Parser, Subcommand};
use commands::Command;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "botforge")]
#[command(about = "botforge CLI", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  botforge backtest --config configs/sample.toml --out runs/\n  botforge backtest --config configs/sample.toml --signals signals.json --seed 42\n  botforge validate --config configs/sample.toml\n  botforge generate --config configs/sample.toml --indicators RSI,ADX --strategy-type trend\n  botforge refine --config configs/sample.toml --code bot.mq5 --errors errors.txt\n"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Run a backtest and write the report, trades, and equity artifacts.
    Backtest {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        /// JSON file with an explicit signal sequence (demo signals otherwise).
        #[arg(long)]
        signals: Option<PathBuf>,
        /// Seed for the demo signal sampler.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check the request parameters and the health of the price series.
    Validate {
        #[arg(long)]
        config: PathBuf,
    },
    /// Generate Expert Advisor source for an indicator recipe.
    Generate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long, value_delimiter = ',')]
        indicators: Vec<String>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        strategy_type: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Repair generated source from compiler output.
    Refine {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        code: PathBuf,
        #[arg(long)]
        errors: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    output::print_banner();
    let cli = Cli::parse();
    let command = match cli.command {
        CliCommand::Backtest {
            config,
            out,
            signals,
            seed,
        } => Command::Backtest {
            config,
            out,
            signals,
            seed,
        },
        CliCommand::Validate { config } => Command::Validate { config },
        CliCommand::Generate {
            config,
            indicators,
            symbol,
            timeframe,
            strategy_type,
            out,
        } => Command::Generate {
            config,
            indicators,
            symbol,
            timeframe,
            strategy_type,
            out,
        },
        CliCommand::Refine {
            config,
            code,
            errors,
            out,
        } => Command::Refine {
            config,
            code,
            errors,
            out,
        },
    };

    if let Err(err) = commands::run(command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
