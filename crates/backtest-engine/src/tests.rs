use analysis_core::{AnalysisError, Bar, Period};
use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};

use crate::metrics::{backtest_from_bars, max_drawdown, MIN_BACKTEST_BARS};
use crate::performance::multi_timeframe_performance;

/// Helper: a daily bar `day` days after 2024-01-01 closing at `close`.
fn bar(day: i64, close: f64) -> Bar {
    Bar {
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap() + Duration::days(day),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000_000.0,
        vwap: None,
    }
}

/// Helper: compound `start` by each step factor in turn, cycling `steps`.
fn compounding(count: usize, start: f64, steps: &[f64]) -> Vec<Bar> {
    let mut close = start;
    (0..count)
        .map(|i| {
            if i > 0 {
                close *= steps[(i - 1) % steps.len()];
            }
            bar(i as i64, close)
        })
        .collect()
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn test_short_history_is_insufficient() {
    let bars = compounding(MIN_BACKTEST_BARS - 1, 100.0, &[1.01]);
    let err = backtest_from_bars(&bars, &[]).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientData(_)));
}

#[test]
fn test_non_positive_close_is_invalid() {
    let mut bars = compounding(60, 100.0, &[1.01]);
    bars[10].close = 0.0;
    let err = backtest_from_bars(&bars, &[]).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidData(_)));
}

#[test]
fn test_bad_benchmark_only_drops_comparison() {
    let good = compounding(60, 100.0, &[1.02, 0.99]);
    let mut bench = compounding(60, 400.0, &[1.01, 0.995]);
    bench[3].close = f64::NAN;

    let result = backtest_from_bars(&good, &bench).unwrap();
    assert!(result.total_return.is_some());
    assert!(result.max_drawdown.unwrap() < 0.0);
    assert!(result.beta.is_none());
    assert!(result.alpha.is_none());
    assert!(result.benchmark_return.is_none());
    assert!(result.excess_return.is_none());
}

// =============================================================================
// Return and risk metrics
// =============================================================================

#[test]
fn test_steady_growth() {
    let bars = compounding(100, 100.0, &[1.01]);
    let result = backtest_from_bars(&bars, &[]).unwrap();

    // 1.01^99 - 1
    assert_relative_eq!(result.total_return.unwrap(), 167.8, epsilon = 0.011);
    assert_relative_eq!(result.max_drawdown.unwrap(), 0.0);
    assert_relative_eq!(result.calmar_ratio.unwrap(), 0.0);
    assert_relative_eq!(result.win_rate.unwrap(), 100.0);
    // No losing days
    assert_relative_eq!(result.profit_factor.unwrap(), 0.0);
    assert_eq!(result.trading_days, 100);
    assert!(result.beta.is_none());
    assert!(result.excess_return.is_none());
}

#[test]
fn test_alternating_days() {
    let bars = compounding(100, 100.0, &[1.02, 0.99]);
    let result = backtest_from_bars(&bars, &[]).unwrap();

    // 50 up days of 2%, 49 down days of 1%
    assert_relative_eq!(result.win_rate.unwrap(), 50.5);
    assert_relative_eq!(result.profit_factor.unwrap(), 2.04);
    assert!(result.volatility.unwrap() > 0.0);
    assert!(result.sharpe_ratio.unwrap() > 0.0);
    assert!(result.sortino_ratio.unwrap() > 0.0);
    assert!(result.max_drawdown.unwrap() < 0.0);
}

#[test]
fn test_max_drawdown_from_compounded_path() {
    // 1.1 -> 0.55 -> 0.66: trough is half the peak
    assert_relative_eq!(max_drawdown(&[0.1, -0.5, 0.2]), -50.0, epsilon = 1e-9);
    assert_relative_eq!(max_drawdown(&[0.05, 0.05]), 0.0);
    assert_relative_eq!(max_drawdown(&[]), 0.0);
}

// =============================================================================
// Benchmark comparison
// =============================================================================

#[test]
fn test_beta_against_benchmark() {
    let bars = compounding(120, 50.0, &[1.02, 0.99]);
    let bench = compounding(120, 400.0, &[1.01, 0.995]);
    let result = backtest_from_bars(&bars, &bench).unwrap();

    assert_relative_eq!(result.beta.unwrap(), 2.0);
    assert!(result.alpha.is_some());
    let excess = result.total_return.unwrap() - result.benchmark_return.unwrap();
    assert_relative_eq!(result.excess_return.unwrap(), excess, epsilon = 0.011);
}

#[test]
fn test_flat_benchmark_defaults_beta_to_one() {
    let bars = compounding(60, 50.0, &[1.02, 0.99]);
    let bench = compounding(60, 400.0, &[1.0]);
    let result = backtest_from_bars(&bars, &bench).unwrap();

    assert_relative_eq!(result.beta.unwrap(), 1.0);
    assert_relative_eq!(result.benchmark_return.unwrap(), 0.0);
}

#[test]
fn test_return_metrics_use_shared_dates() {
    // 40 losing days, then 59 winning days
    let bars: Vec<Bar> = (0..100)
        .map(|i| {
            let close = if i <= 40 {
                100.0 * 0.99f64.powi(i)
            } else {
                100.0 * 0.99f64.powi(40) * 1.01f64.powi(i - 40)
            };
            bar(i as i64, close)
        })
        .collect();
    // Benchmark only trades from day 40, so the shared returns are the winning days
    let bench: Vec<Bar> = (40..100).map(|i| bar(i, 400.0 + i as f64)).collect();

    let alone = backtest_from_bars(&bars, &[]).unwrap();
    assert_relative_eq!(alone.win_rate.unwrap(), 59.6);
    assert!(alone.max_drawdown.unwrap() < -30.0);

    let compared = backtest_from_bars(&bars, &bench).unwrap();
    assert_relative_eq!(compared.win_rate.unwrap(), 100.0);
    assert_relative_eq!(compared.max_drawdown.unwrap(), 0.0);
    assert_relative_eq!(compared.profit_factor.unwrap(), 0.0);
    // Whole-series return is unaffected
    assert_relative_eq!(compared.total_return.unwrap(), alone.total_return.unwrap());
    assert!(compared.beta.is_some());
}

#[test]
fn test_benchmark_without_shared_dates_is_skipped() {
    let bars = compounding(60, 50.0, &[1.01]);
    let bench: Vec<Bar> = (0..60).map(|i| bar(1000 + i, 400.0 + i as f64)).collect();
    let result = backtest_from_bars(&bars, &bench).unwrap();

    assert!(result.beta.is_none());
    assert!(result.benchmark_return.is_none());
}

// =============================================================================
// Multi-timeframe returns
// =============================================================================

#[test]
fn test_multi_timeframe_windows() {
    // close = 100 + day, 400 consecutive days
    let bars: Vec<Bar> = (0..400).map(|i| bar(i, 100.0 + i as f64)).collect();
    let perf = multi_timeframe_performance(&bars);

    // 1M window starts at day 369 (close 469)
    assert_relative_eq!(perf.get(Period::OneMonth).unwrap(), 6.4);
    // 1Y window starts at day 34 (close 134)
    assert_relative_eq!(perf.get(Period::OneYear).unwrap(), 272.39);
    // Longer windows cover the whole series
    assert_relative_eq!(perf.get(Period::TwoYears).unwrap(), 399.0);
    assert_relative_eq!(perf.get(Period::ThreeYears).unwrap(), 399.0);
}

#[test]
fn test_multi_timeframe_needs_two_bars_in_window() {
    // Gap of 60 days before the last bar leaves 1M with a single bar
    let bars = vec![bar(0, 100.0), bar(10, 105.0), bar(70, 110.0)];
    let perf = multi_timeframe_performance(&bars);

    assert!(perf.get(Period::OneMonth).is_none());
    assert_relative_eq!(perf.get(Period::ThreeMonths).unwrap(), 10.0);
    assert!(multi_timeframe_performance(&[]).is_empty());
}
