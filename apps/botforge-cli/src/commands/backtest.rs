use botforge_application::backtesting;
use botforge_application::meta::engine_name;
use botforge_application::validation;
use botforge_domain::entities::report::{BacktestReport, ReportStatus};
use botforge_domain::services::signals::DEFAULT_DEMO_TRADES;
use botforge_domain::value_objects::signal::Signal;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

pub(super) fn run_backtest(
    config_path: PathBuf,
    out: Option<PathBuf>,
    signals_path: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(), String> {
    let (config, _config_toml) = super::common::init(&config_path)?;
    super::common::print_config_summary("backtest", &config);

    let overall_start = std::time::Instant::now();

    let deps = crate::infra::build_engine_deps(&config)?;
    let request = super::common::request_from_config(&config);
    validation::validate_request(&request).map_err(|err| err.to_string())?;

    let signals_config = config.signals.as_ref();
    let supplied = match signals_path.or_else(|| {
        signals_config
            .and_then(|section| section.signals_path.clone())
            .map(PathBuf::from)
    }) {
        Some(path) => Some(load_signals(&path)?),
        None => None,
    };

    let demo_trades = signals_config
        .and_then(|section| section.demo_trades)
        .unwrap_or(DEFAULT_DEMO_TRADES);
    let mut rng = match seed.or_else(|| signals_config.and_then(|section| section.seed)) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = backtesting::run_backtest(
        deps.provider.as_ref(),
        &request,
        supplied,
        demo_trades,
        &mut rng,
    );

    print_report_summary(&report);

    let base_dir = out.unwrap_or_else(|| PathBuf::from(&config.paths.out_dir));
    let run_dir = base_dir.join(&config.run.run_id);
    deps.artifacts
        .ensure_dir(&run_dir)
        .map_err(|err| err.to_string())?;
    deps.artifacts
        .write_report_json(run_dir.join("report.json").as_path(), &report)
        .map_err(|err| err.to_string())?;
    deps.artifacts
        .write_trades_csv(run_dir.join("trades.csv").as_path(), &report.trades)
        .map_err(|err| err.to_string())?;
    deps.artifacts
        .write_equity_csv(run_dir.join("equity.csv").as_path(), &report.equity_curve)
        .map_err(|err| err.to_string())?;

    println!("run output: {}", run_dir.display());
    println!(
        "{} cli: backtest total_ms={}",
        engine_name(),
        overall_start.elapsed().as_millis()
    );

    if report.status == ReportStatus::Error {
        return Err(report.message);
    }
    Ok(())
}

fn load_signals(path: &Path) -> Result<Vec<Signal>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read signals {}: {}", path.display(), err))?;
    serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse signals {}: {}", path.display(), err))
}

fn print_report_summary(report: &BacktestReport) {
    println!(
        "status: {}",
        match report.status {
            ReportStatus::Success => "success",
            ReportStatus::Error => "error",
        }
    );
    println!(
        "metrics: total_return_pct={} sharpe_ratio={} max_drawdown_pct={} win_rate_pct={} profit_factor={}",
        report.total_return_pct,
        report.sharpe_ratio,
        report.max_drawdown_pct,
        report.win_rate_pct,
        report.profit_factor
    );
    println!(
        "trades: total={} final_capital={:.2}",
        report.total_trades, report.final_capital
    );
}
