use analysis_core::{known, BacktestResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SharpeRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SharpeRating {
    pub fn from_sharpe(sharpe: f64) -> Self {
        if sharpe > 2.0 {
            SharpeRating::Excellent
        } else if sharpe > 1.0 {
            SharpeRating::Good
        } else if sharpe > 0.0 {
            SharpeRating::Fair
        } else {
            SharpeRating::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SharpeRating::Excellent => "EXCELLENT",
            SharpeRating::Good => "GOOD",
            SharpeRating::Fair => "FAIR",
            SharpeRating::Poor => "POOR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DrawdownRating {
    Low,
    Moderate,
    High,
    Extreme,
}

impl DrawdownRating {
    /// Rated on the drawdown's magnitude, so `-20` and `20` agree.
    pub fn from_drawdown(max_drawdown: f64) -> Self {
        let depth = max_drawdown.abs();
        if depth < 15.0 {
            DrawdownRating::Low
        } else if depth < 30.0 {
            DrawdownRating::Moderate
        } else if depth < 50.0 {
            DrawdownRating::High
        } else {
            DrawdownRating::Extreme
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrawdownRating::Low => "LOW",
            DrawdownRating::Moderate => "MODERATE",
            DrawdownRating::High => "HIGH",
            DrawdownRating::Extreme => "EXTREME",
        }
    }
}

/// Risk-adjusted view of a backtest with its two ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustedMetrics {
    pub sharpe_ratio: f64,
    pub sortino_ratio: Option<f64>,
    pub calmar_ratio: Option<f64>,
    pub risk_rating: SharpeRating,
    pub max_drawdown: f64,
    pub drawdown_rating: DrawdownRating,
    pub win_rate: Option<f64>,
    pub profit_factor: Option<f64>,
}

/// Rate a backtest by Sharpe ratio and drawdown depth. `None` unless both
/// are present.
pub fn risk_adjusted_metrics(backtest: &BacktestResult) -> Option<RiskAdjustedMetrics> {
    let sharpe_ratio = known(backtest.sharpe_ratio)?;
    let max_drawdown = known(backtest.max_drawdown)?;

    Some(RiskAdjustedMetrics {
        sharpe_ratio,
        sortino_ratio: known(backtest.sortino_ratio),
        calmar_ratio: known(backtest.calmar_ratio),
        risk_rating: SharpeRating::from_sharpe(sharpe_ratio),
        max_drawdown,
        drawdown_rating: DrawdownRating::from_drawdown(max_drawdown),
        win_rate: known(backtest.win_rate),
        profit_factor: known(backtest.profit_factor),
    })
}
