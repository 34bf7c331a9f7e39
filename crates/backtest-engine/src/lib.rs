//! Historical performance metrics and multi-timeframe returns from daily bars.

pub mod metrics;
pub mod performance;
pub mod ratings;

#[cfg(test)]
mod tests;

pub use metrics::{backtest_from_bars, daily_returns, max_drawdown, MIN_BACKTEST_BARS};
pub use performance::{multi_timeframe_performance, period_return};
pub use ratings::{risk_adjusted_metrics, DrawdownRating, RiskAdjustedMetrics, SharpeRating};
