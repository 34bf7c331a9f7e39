use std::collections::HashMap;

use analysis_core::config::{RISK_FREE_RATE, TRADING_DAYS_PER_YEAR};
use analysis_core::{round_to, AnalysisError, BacktestResult, Bar};
use chrono::NaiveDate;
use statrs::statistics::Statistics;
use tracing::debug;

/// Bars required for a meaningful history
pub const MIN_BACKTEST_BARS: usize = 50;

/// Daily simple returns keyed by the date of the later bar.
pub fn daily_returns(bars: &[Bar]) -> Vec<(NaiveDate, f64)> {
    bars.windows(2)
        .filter(|w| w[0].close > 0.0)
        .map(|w| (w[1].timestamp.date_naive(), w[1].close / w[0].close - 1.0))
        .collect()
}

/// Most negative peak-to-trough move of the compounded return path, in
/// percent. The running peak starts at the first compounded value.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut cumulative = 1.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;

    for r in returns {
        cumulative *= 1.0 + r;
        peak = peak.max(cumulative);
        if peak > 0.0 {
            worst = worst.min((cumulative - peak) / peak);
        }
    }

    worst * 100.0
}

/// Sample standard deviation, zero when fewer than two values.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let std = values.iter().std_dev();
    if std.is_finite() {
        std
    } else {
        0.0
    }
}

fn validate_series(bars: &[Bar], label: &str) -> Result<(), AnalysisError> {
    if let Some(bad) = bars.iter().find(|b| !b.close.is_finite() || b.close <= 0.0) {
        return Err(AnalysisError::InvalidData(format!(
            "{label} close {} at {} is not a positive price",
            bad.close, bad.timestamp
        )));
    }
    Ok(())
}

struct BenchmarkStats {
    beta: f64,
    alpha: f64,
    total_return: f64,
}

/// Stock and benchmark daily returns on the dates both series traded.
/// `None` when fewer than two dates are shared.
fn align_returns(returns: &[(NaiveDate, f64)], benchmark: &[Bar]) -> Option<(Vec<f64>, Vec<f64>)> {
    if benchmark.len() < 2 {
        return None;
    }
    let bench_by_date: HashMap<NaiveDate, f64> = daily_returns(benchmark).into_iter().collect();
    let (own, bench): (Vec<f64>, Vec<f64>) = returns
        .iter()
        .filter_map(|(date, r)| bench_by_date.get(date).map(|b| (*r, *b)))
        .unzip();
    if own.len() < 2 {
        return None;
    }
    Some((own, bench))
}

fn benchmark_stats(own: &[f64], bench: &[f64], benchmark: &[Bar], annualized_return: f64) -> Option<BenchmarkStats> {
    let first = benchmark.first()?;
    let last = benchmark.last()?;
    let total_return = (last.close / first.close - 1.0) * 100.0;

    let bench_variance = bench.iter().variance();
    let beta = if bench_variance > 0.0 {
        own.iter().covariance(bench.iter()) / bench_variance
    } else {
        1.0
    };

    let rf_pct = RISK_FREE_RATE * 100.0;
    let bench_annual_pct = bench.iter().mean() * TRADING_DAYS_PER_YEAR * 100.0;
    let alpha = annualized_return - (rf_pct + beta * (bench_annual_pct - rf_pct));

    Some(BenchmarkStats {
        beta,
        alpha,
        total_return,
    })
}

/// Historical performance of a daily close series, optionally against a
/// benchmark series (pass an empty slice to skip the comparison).
///
/// Returns are annualised over 252 trading days with a 4% risk-free rate.
/// Ratios whose denominator is zero report 0.
///
/// Total and annualised return always span the whole series. When the
/// benchmark shares at least two dates with it, the return-series metrics
/// (volatility, Sharpe, Sortino, drawdown, win rate, profit factor) use only
/// the shared dates. A benchmark with a bad close, or with no overlap, is
/// skipped and leaves the benchmark fields absent.
pub fn backtest_from_bars(bars: &[Bar], benchmark: &[Bar]) -> Result<BacktestResult, AnalysisError> {
    if bars.len() < MIN_BACKTEST_BARS {
        return Err(AnalysisError::InsufficientData(format!(
            "need at least {MIN_BACKTEST_BARS} bars for a backtest, got {}",
            bars.len()
        )));
    }
    validate_series(bars, "series")?;
    let benchmark: &[Bar] = match validate_series(benchmark, "benchmark") {
        Ok(()) => benchmark,
        Err(e) => {
            debug!("Skipping benchmark comparison: {}", e);
            &[]
        }
    };

    let dated_returns = daily_returns(bars);
    let aligned = align_returns(&dated_returns, benchmark);
    let returns: Vec<f64> = match &aligned {
        Some((own, _)) => own.clone(),
        None => dated_returns.iter().map(|(_, r)| *r).collect(),
    };

    let first = bars[0].close;
    let last = bars[bars.len() - 1].close;
    let total_return = (last / first - 1.0) * 100.0;

    let years = bars.len() as f64 / TRADING_DAYS_PER_YEAR;
    let annualized_return = ((1.0 + total_return / 100.0).powf(1.0 / years) - 1.0) * 100.0;

    let volatility = sample_std(&returns) * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;
    let sharpe_ratio = if volatility > 0.0 {
        (annualized_return / 100.0 - RISK_FREE_RATE) / (volatility / 100.0)
    } else {
        0.0
    };

    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_std = sample_std(&downside) * TRADING_DAYS_PER_YEAR.sqrt();
    let sortino_ratio = if downside_std > 0.0 {
        (annualized_return / 100.0 - RISK_FREE_RATE) / downside_std
    } else {
        0.0
    };

    let max_dd = max_drawdown(&returns);
    let calmar_ratio = if max_dd != 0.0 {
        annualized_return / max_dd.abs()
    } else {
        0.0
    };

    let win_rate = if returns.is_empty() {
        0.0
    } else {
        returns.iter().filter(|r| **r > 0.0).count() as f64 / returns.len() as f64 * 100.0
    };

    let gains: f64 = returns.iter().filter(|r| **r > 0.0).sum();
    let losses: f64 = returns.iter().filter(|r| **r < 0.0).sum::<f64>().abs();
    let profit_factor = if losses > 0.0 { gains / losses } else { 0.0 };

    let bench = aligned
        .as_ref()
        .and_then(|(own, bench)| benchmark_stats(own, bench, benchmark, annualized_return));

    debug!(
        bars = bars.len(),
        total_return,
        max_drawdown = max_dd,
        benchmark = bench.is_some(),
        "computed backtest metrics"
    );

    Ok(BacktestResult {
        total_return: Some(round_to(total_return, 2)),
        annualized_return: Some(round_to(annualized_return, 2)),
        volatility: Some(round_to(volatility, 2)),
        sharpe_ratio: Some(round_to(sharpe_ratio, 2)),
        sortino_ratio: Some(round_to(sortino_ratio, 2)),
        calmar_ratio: Some(round_to(calmar_ratio, 2)),
        max_drawdown: Some(round_to(max_dd, 2)),
        win_rate: Some(round_to(win_rate, 1)),
        profit_factor: Some(round_to(profit_factor, 2)),
        beta: bench.as_ref().map(|b| round_to(b.beta, 2)),
        alpha: bench.as_ref().map(|b| round_to(b.alpha, 2)),
        benchmark_return: bench.as_ref().map(|b| round_to(b.total_return, 2)),
        excess_return: bench.as_ref().map(|b| round_to(total_return - b.total_return, 2)),
        trading_days: bars.len(),
    })
}
