use botforge_application::backtesting::BacktestRequest;
use botforge_application::config::{Config, ProviderKind};
use botforge_application::meta::engine_name;
use std::path::Path;

pub(super) fn init(config_path: &Path) -> Result<(Config, String), String> {
    let (config, config_toml) =
        botforge_application::config::load_config_with_source(config_path)?;

    let obs = config.observability.as_ref();
    crate::obs::init_tracing(
        obs.and_then(|section| section.log_level.as_deref())
            .unwrap_or("info"),
        obs.and_then(|section| section.log_format.as_deref())
            .unwrap_or("text"),
    )?;
    crate::obs::init_metrics(obs.and_then(|section| section.metrics_addr.as_deref()))?;

    Ok((config, config_toml))
}

pub(super) fn print_config_summary(command: &str, config: &Config) {
    println!(
        "{} cli: {} (run_id={}, symbol={}, timeframe={}, period_years={}, initial_capital={}, commission={})",
        engine_name(),
        command,
        config.run.run_id,
        config.run.symbol,
        config.run.timeframe,
        config.run.period_years,
        config.run.initial_capital,
        config.run.commission
    );
    println!(
        "provider: kind={}, base_url={}, csv_path={}",
        match config.provider.kind {
            ProviderKind::Http => "http",
            ProviderKind::Csv => "csv",
        },
        config.provider.base_url.as_deref().unwrap_or("none"),
        config.provider.csv_path.as_deref().unwrap_or("none")
    );
    let signals = config.signals.as_ref();
    println!(
        "signals: demo_trades={}, seed={}, signals_path={}",
        signals
            .and_then(|section| section.demo_trades)
            .map(|count| count.to_string())
            .unwrap_or_else(|| "default".to_string()),
        signals
            .and_then(|section| section.seed)
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "entropy".to_string()),
        signals
            .and_then(|section| section.signals_path.as_deref())
            .unwrap_or("none")
    );
    println!("paths: out_dir={}", config.paths.out_dir);
}

pub(super) fn request_from_config(config: &Config) -> BacktestRequest {
    BacktestRequest {
        symbol: config.run.symbol.clone(),
        timeframe: config.run.timeframe.clone(),
        period_years: config.run.period_years,
        initial_capital: config.run.initial_capital,
        commission: config.run.commission,
    }
}
