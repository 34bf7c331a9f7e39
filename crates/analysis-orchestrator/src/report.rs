//! Report inputs and the assembled per-security report.

use analysis_core::config::FIFTY_TWO_WEEK_BARS;
use analysis_core::{
    positive, BacktestResult, Bar, CommentaryRecord, OptionsChainSummary, SecuritySnapshot,
};
use backtest_engine::{backtest_from_bars, multi_timeframe_performance, RiskAdjustedMetrics};
use chrono::{DateTime, Utc};
use commentary_analysis::QualityAssessment;
use fundamental_analysis::{RiskAssessment, ValuationAssessment};
use options_flow::{summarize_chain, OptionContract, OptionsFlow};
use serde::{Deserialize, Serialize};
use technical_analysis::{
    compute_indicator_set, FibonacciLevels, MomentumScore, TechnicalSummary, UnifiedSignal,
};
use tracing::debug;

use crate::risk_reward::RiskReward;

/// Everything known about one security. Only `snapshot` is needed; the
/// rest switch on the matching sections of the report.
///
/// Raw `bars` fill in whatever the snapshot leaves out: indicators,
/// multi-timeframe returns, the backtest, a missing price, the 52-week
/// range and volume. A raw `option_chain` is summarised when no `options`
/// summary is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRequest {
    pub snapshot: SecuritySnapshot,
    pub backtest: Option<BacktestResult>,
    pub options: Option<OptionsChainSummary>,
    pub option_chain: Vec<OptionContract>,
    pub expiry: String,
    pub commentary: Option<CommentaryRecord>,
    pub bars: Vec<Bar>,
    pub benchmark_bars: Vec<Bar>,
}

/// Request inputs after the bar series and option chain were folded in.
#[derive(Debug, Clone)]
pub struct PreparedInputs {
    pub snapshot: SecuritySnapshot,
    pub backtest: Option<BacktestResult>,
    pub options: Option<OptionsChainSummary>,
}

/// Fill the 52-week range and volume fields the snapshot lacks from the
/// trailing year of bars. The average includes the latest bar.
fn fill_range_and_volume(snapshot: &mut SecuritySnapshot, bars: &[Bar]) {
    let year = &bars[bars.len().saturating_sub(FIFTY_TWO_WEEK_BARS)..];
    let Some(last) = year.last() else {
        return;
    };

    if positive(snapshot.high_52w).is_none() {
        snapshot.high_52w = year.iter().map(|b| b.high).reduce(f64::max);
    }
    if positive(snapshot.low_52w).is_none() {
        snapshot.low_52w = year.iter().map(|b| b.low).reduce(f64::min);
    }
    if positive(snapshot.volume).is_none() {
        snapshot.volume = Some(last.volume);
    }
    if positive(snapshot.avg_volume).is_none() {
        snapshot.avg_volume = Some(year.iter().map(|b| b.volume).sum::<f64>() / year.len() as f64);
    }
}

impl ReportRequest {
    pub fn new(snapshot: SecuritySnapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    /// Fill gaps in the snapshot from the raw series. Supplied values always
    /// win over derived ones.
    pub fn prepare(&self) -> PreparedInputs {
        let mut snapshot = self.snapshot.clone();
        let mut backtest = self.backtest.clone();

        if !self.bars.is_empty() {
            if positive(snapshot.price).is_none() {
                snapshot.price = self.bars.last().map(|b| b.close);
            }
            fill_range_and_volume(&mut snapshot, &self.bars);
            if snapshot.indicators.is_empty() {
                snapshot.indicators = compute_indicator_set(&self.bars);
            }
            if snapshot.performance.is_empty() {
                snapshot.performance = multi_timeframe_performance(&self.bars);
            }
            if backtest.is_none() {
                match backtest_from_bars(&self.bars, &self.benchmark_bars) {
                    Ok(result) => backtest = Some(result),
                    Err(e) => debug!(symbol = %snapshot.symbol, "Skipping backtest: {}", e),
                }
            }
        }

        let options = match &self.options {
            Some(summary) => Some(summary.clone()),
            None if !self.option_chain.is_empty() => {
                Some(summarize_chain(&self.option_chain, self.expiry.clone()))
            }
            None => None,
        };

        PreparedInputs {
            snapshot,
            backtest,
            options,
        }
    }
}

/// Every analysis for one security, ready to serialise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityReport {
    pub symbol: String,
    pub price: Option<f64>,
    pub quality: Option<QualityAssessment>,
    pub risk: RiskAssessment,
    pub valuation: ValuationAssessment,
    pub technical_summary: TechnicalSummary,
    pub signal: UnifiedSignal,
    pub momentum: MomentumScore,
    pub alerts: Vec<String>,
    pub risk_reward: Option<RiskReward>,
    pub options_flow: Option<OptionsFlow>,
    pub fibonacci: Option<FibonacciLevels>,
    pub backtest: Option<BacktestResult>,
    pub risk_metrics: Option<RiskAdjustedMetrics>,
    pub generated_at: DateTime<Utc>,
}
