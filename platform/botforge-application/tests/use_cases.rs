use botforge_application::backtesting::{run_backtest, BacktestRequest};
use botforge_application::results::summary_stats;
use botforge_application::validation::{preflight, validate_request};
use botforge_application::{bots, results};
use botforge_domain::entities::report::ReportStatus;
use botforge_domain::errors::BotforgeError;
use botforge_domain::repositories::bots::{BotPatch, NewBot};
use botforge_domain::repositories::market_data::{MarketDataProvider, SeriesQuery};
use botforge_domain::repositories::results::{NewResult, ResultQuery};
use botforge_domain::value_objects::bar::PriceBar;
use botforge_domain::value_objects::side::Side;
use botforge_domain::value_objects::signal::Signal;
use botforge_infrastructure::persistence::memory::{MemoryBotRepository, MemoryResultRepository};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct FakeProvider {
    bars: Vec<PriceBar>,
}

impl MarketDataProvider for FakeProvider {
    fn acquire_series(&self, query: &SeriesQuery) -> Result<Vec<PriceBar>, BotforgeError> {
        if self.bars.is_empty() {
            return Err(BotforgeError::NoData(format!(
                "no price data available for {}",
                query.symbol
            )));
        }
        Ok(self.bars.clone())
    }
}

fn bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|idx| PriceBar {
            timestamp: idx as i64,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.0 + idx as f64,
            volume: 1_000.0,
        })
        .collect()
}

fn request() -> BacktestRequest {
    BacktestRequest {
        symbol: "EURUSD".to_string(),
        timeframe: "H1".to_string(),
        period_years: 5,
        initial_capital: 10_000.0,
        commission: 0.0001,
    }
}

fn signal(timestamp: i64, side: Side, price: f64) -> Signal {
    Signal {
        timestamp,
        side,
        price,
    }
}

#[test]
fn empty_signal_list_yields_seed_curve_and_zero_metrics() {
    let provider = FakeProvider { bars: bars(10) };
    let mut rng = StdRng::seed_from_u64(1);

    let report = run_backtest(&provider, &request(), Some(Vec::new()), 50, &mut rng);

    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.equity_curve, vec![10_000.0]);
    assert_eq!(report.total_trades, 0);
    assert_eq!(report.total_return_pct, 0.0);
    assert_eq!(report.sharpe_ratio, 0.0);
    assert_eq!(report.max_drawdown_pct, 0.0);
    assert_eq!(report.win_rate_pct, 0.0);
    assert_eq!(report.profit_factor, 0.0);
    assert_eq!(report.final_capital, 10_000.0);
}

#[test]
fn known_round_trip_produces_expected_numbers() {
    let provider = FakeProvider { bars: bars(10) };
    let mut rng = StdRng::seed_from_u64(1);
    let signals = vec![
        signal(0, Side::Buy, 100.0),
        signal(1, Side::Sell, 110.0),
    ];

    let report = run_backtest(&provider, &request(), Some(signals), 50, &mut rng);

    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.total_trades, 1);
    assert!((report.final_capital - 10_947.91).abs() < 1e-9);
    assert_eq!(report.total_return_pct, 9.48);
    assert_eq!(report.win_rate_pct, 100.0);
    assert!((report.trades[0].return_pct - 947.91 / 9_500.0 * 100.0).abs() < 1e-9);
    assert_eq!(report.equity_curve.len(), 3);
    // Echoed request parameters.
    assert_eq!(report.symbol, "EURUSD");
    assert_eq!(report.period_years, 5);
    assert_eq!(report.initial_capital, 10_000.0);
}

#[test]
fn unmatched_buy_marks_to_market_without_trades() {
    let provider = FakeProvider { bars: bars(10) };
    let mut rng = StdRng::seed_from_u64(1);
    let signals = vec![
        signal(0, Side::Buy, 100.0),
        signal(1, Side::Buy, 104.0),
        signal(2, Side::Buy, 108.0),
    ];

    let report = run_backtest(&provider, &request(), Some(signals), 50, &mut rng);

    assert_eq!(report.total_trades, 0);
    assert_eq!(report.equity_curve.len(), 4);
    // Mark-to-market moves equity even though nothing was realized.
    assert!(report.final_capital > 10_000.0);
}

#[test]
fn demo_mode_generates_signals_from_the_series() {
    let provider = FakeProvider { bars: bars(200) };
    let mut rng = StdRng::seed_from_u64(42);

    let report = run_backtest(&provider, &request(), None, 10, &mut rng);

    assert_eq!(report.status, ReportStatus::Success);
    // 10 alternating signals close 5 round trips.
    assert_eq!(report.equity_curve.len(), 11);
    assert_eq!(report.total_trades, 5);
}

#[test]
fn constant_price_signals_leave_every_metric_flat() {
    let provider = FakeProvider { bars: bars(10) };
    let mut rng = StdRng::seed_from_u64(1);
    let signals = vec![
        signal(0, Side::Buy, 100.0),
        signal(1, Side::Sell, 100.0),
        signal(2, Side::Buy, 100.0),
        signal(3, Side::Sell, 100.0),
    ];

    let mut request = request();
    request.commission = 0.0;
    let report = run_backtest(&provider, &request, Some(signals), 50, &mut rng);

    // Zero-variance curve trips the stddev guard.
    assert_eq!(report.sharpe_ratio, 0.0);
    assert_eq!(report.max_drawdown_pct, 0.0);
    assert_eq!(report.total_return_pct, 0.0);
    assert_eq!(report.final_capital, 10_000.0);
    assert_eq!(report.total_trades, 2);
}

#[test]
fn empty_series_becomes_an_error_report() {
    let provider = FakeProvider { bars: Vec::new() };
    let mut rng = StdRng::seed_from_u64(1);

    let report = run_backtest(&provider, &request(), None, 50, &mut rng);

    assert_eq!(report.status, ReportStatus::Error);
    assert!(report.message.contains("no data"));
    assert_eq!(report.total_trades, 0);
    assert!(report.equity_curve.is_empty());
    // Request parameters are still echoed on failure.
    assert_eq!(report.symbol, "EURUSD");
}

#[test]
fn validation_rejects_before_the_engine_runs() {
    let mut bad = request();
    bad.initial_capital = -1.0;
    assert!(matches!(
        validate_request(&bad),
        Err(BotforgeError::InvalidParameter(_))
    ));

    let mut bad = request();
    bad.period_years = 25;
    assert!(validate_request(&bad).is_err());
}

#[test]
fn preflight_reports_series_health() {
    let provider = FakeProvider { bars: bars(20) };
    let summary = preflight(&provider, &request()).expect("preflight should succeed");

    assert_eq!(summary["rows"], 20);
    assert_eq!(summary["clean"], true);
    assert_eq!(summary["symbol"], "EURUSD");
}

#[test]
fn bot_crud_round_trip() {
    let repo = MemoryBotRepository::new();
    let created = bots::create_bot(
        &repo,
        NewBot {
            name: "rsi trend bot".to_string(),
            indicators: vec!["RSI".to_string(), "ADX".to_string()],
            symbol: "EURUSD".to_string(),
            timeframe: "H1".to_string(),
            strategy_type: "trend".to_string(),
            code: "int OnInit() { return INIT_SUCCEEDED; }".to_string(),
            description: Some("demo".to_string()),
        },
    )
    .expect("create should succeed");

    let fetched = bots::get_bot(&repo, created.id).expect("bot exists");
    assert_eq!(fetched.name, "rsi trend bot");

    let updated = bots::update_bot(
        &repo,
        created.id,
        BotPatch {
            description: Some("updated".to_string()),
            ..BotPatch::default()
        },
    )
    .expect("update should succeed");
    assert_eq!(updated.description.as_deref(), Some("updated"));

    bots::delete_bot(&repo, created.id).expect("delete should succeed");
    assert!(matches!(
        bots::get_bot(&repo, created.id),
        Err(BotforgeError::NotFound(_))
    ));
}

#[test]
fn bot_creation_validates_name_and_code() {
    let repo = MemoryBotRepository::new();
    let mut bot = NewBot {
        name: String::new(),
        indicators: Vec::new(),
        symbol: "EURUSD".to_string(),
        timeframe: "H1".to_string(),
        strategy_type: "trend".to_string(),
        code: "void OnTick() {}".to_string(),
        description: None,
    };
    assert!(bots::create_bot(&repo, bot.clone()).is_err());

    bot.name = "named".to_string();
    bot.code = String::new();
    assert!(bots::create_bot(&repo, bot).is_err());
}

#[test]
fn results_store_round_trip_and_summary() {
    let provider = FakeProvider { bars: bars(10) };
    let repo = MemoryResultRepository::new();
    let mut rng = StdRng::seed_from_u64(1);

    let winning = run_backtest(
        &provider,
        &request(),
        Some(vec![
            signal(0, Side::Buy, 100.0),
            signal(1, Side::Sell, 110.0),
        ]),
        50,
        &mut rng,
    );
    let losing = run_backtest(
        &provider,
        &request(),
        Some(vec![
            signal(0, Side::Buy, 100.0),
            signal(1, Side::Sell, 95.0),
        ]),
        50,
        &mut rng,
    );

    results::save_result(
        &repo,
        NewResult {
            bot_id: Some(1),
            bot_name: "winner".to_string(),
            description: None,
            report: winning,
        },
    )
    .expect("save should succeed");
    results::save_result(
        &repo,
        NewResult {
            bot_id: None,
            bot_name: "loser".to_string(),
            description: None,
            report: losing,
        },
    )
    .expect("save should succeed");

    let listed = results::list_results(&repo, &ResultQuery::default()).expect("list succeeds");
    assert_eq!(listed.len(), 2);

    let stats = summary_stats(&repo).expect("stats should succeed");
    assert_eq!(stats.total_results, 2);
    let best = stats.best_result.expect("a best result exists");
    assert_eq!(best.bot_name, "winner");
    assert!(best.total_return_pct > 0.0);

    results::delete_result(&repo, listed[0].id).expect("delete succeeds");
    assert!(matches!(
        results::get_result(&repo, listed[0].id),
        Err(BotforgeError::NotFound(_))
    ));
}
