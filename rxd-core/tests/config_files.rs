//! Config documents loaded from disk and driven through a replay.

use rust_decimal_macros::dec;
use rxd_core::data::synthetic_bars;
use rxd_core::decision::DecisionMode;
use rxd_core::engine::run_session;
use rxd_core::{ConfigError, RxdStrategy, StrategyConfig};

const FULL: &str = r#"
symbol = "ES"
mode = "ai_filter"
price_step = 0.25

[supervisor]
ma_length = 12
shift_step = 4
weight1 = 130
weight2 = 115
weight3 = 105
weight4 = 100
threshold = 100

[long]
ma_length = 6
shift_step = 2
weight1 = 125
weight2 = 110
weight3 = 100
weight4 = 100
threshold = 102

[short]
ma_length = 6
shift_step = 2
weight1 = 125
weight2 = 110
weight3 = 100
weight4 = 100
threshold = 98

[filters]
enabled = true
use_adx = true
adx_threshold = 20.0
use_sar = true

[protective]
use_atr = true
take_profit_points = 300
stop_loss_points = 150

[indicators]
atr_period = 10
adx_period = 10

[execution]
volume = 2
"#;

#[test]
fn full_document_loads_and_replays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("es.toml");
    std::fs::write(&path, FULL).unwrap();

    let config = StrategyConfig::load(&path).unwrap();
    assert_eq!(config.mode, DecisionMode::AiFilter);
    assert_eq!(config.price_step, dec!(0.25));
    assert_eq!(config.execution.volume, dec!(2));
    assert_eq!(config.indicators.atr_period, 10);
    assert_eq!(config.indicators.rsi_period, 14);

    let strategy = RxdStrategy::new(&config).unwrap();
    assert_eq!(strategy.filter_bank().filter_names(), vec!["adx", "sar"]);

    let report = run_session(&config, &synthetic_bars(500, 3, 0.0, 0.02)).unwrap();
    for decision in report.decisions() {
        for leg in [decision.take_profit_distance, decision.stop_loss_distance].into_iter().flatten() {
            // every leg is a whole number of price steps
            assert_eq!((leg / dec!(0.25)).fract(), dec!(0));
        }
    }
    for fill in report.fills() {
        assert_eq!(fill.quantity, dec!(2));
    }
}

#[test]
fn written_default_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.toml");
    std::fs::write(&path, StrategyConfig::default().to_toml_string().unwrap()).unwrap();
    assert_eq!(StrategyConfig::load(&path).unwrap(), StrategyConfig::default());
}

#[test]
fn negative_factor_fails_before_replay() {
    let text = "[protective]\natr_stop_factor = -1\n";
    let err = StrategyConfig::from_toml_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::Negative { name: "atr_stop_factor", .. }));
}

#[test]
fn macd_fast_not_below_slow_rejected() {
    let text = "[indicators]\nmacd_fast = 26\nmacd_slow = 12\n";
    let err = StrategyConfig::from_toml_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidIndicator { .. }));
}
