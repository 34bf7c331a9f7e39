use analysis_core::{
    BacktestResult, CommentaryRecord, EngineConfig, MultiTimeframePerformance, OptionsChainSummary,
    SecuritySnapshot, TechnicalIndicatorSet,
};
use backtest_engine::RiskAdjustedMetrics;
use chrono::Utc;
use commentary_analysis::QualityAssessment;
use fundamental_analysis::{RiskAssessment, ValuationAssessment};
use options_flow::OptionsFlow;
use technical_analysis::{FibonacciLevels, MomentumScore, TechnicalSummary, UnifiedSignal};
use tracing::debug;

use crate::alerts;
use crate::report::{ReportRequest, SecurityReport};
use crate::risk_reward::{self, RiskReward};

/// Stateless facade over every scorer. Holds only the thresholds, so one
/// instance can be shared across threads and securities.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: EngineConfig,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn quality_score(&self, record: &CommentaryRecord) -> f64 {
        commentary_analysis::quality_score(record)
    }

    pub fn assess_quality(&self, record: &CommentaryRecord) -> QualityAssessment {
        commentary_analysis::assess_quality(record)
    }

    pub fn assess_risk(&self, snapshot: &SecuritySnapshot) -> RiskAssessment {
        fundamental_analysis::assess_risk(snapshot)
    }

    pub fn assess_valuation(&self, snapshot: &SecuritySnapshot) -> ValuationAssessment {
        fundamental_analysis::assess_valuation(snapshot)
    }

    pub fn technical_summary(&self, indicators: &TechnicalIndicatorSet, price: Option<f64>) -> TechnicalSummary {
        technical_analysis::technical_summary(indicators, price, &self.config)
    }

    pub fn unified_signal(&self, indicators: &TechnicalIndicatorSet, price: Option<f64>) -> UnifiedSignal {
        technical_analysis::unified_signal(indicators, price, &self.config)
    }

    pub fn momentum_score(&self, performance: &MultiTimeframePerformance) -> MomentumScore {
        technical_analysis::momentum_score(performance)
    }

    pub fn price_alerts(&self, snapshot: &SecuritySnapshot, backtest: Option<&BacktestResult>) -> Vec<String> {
        alerts::price_alerts(snapshot, backtest)
    }

    pub fn risk_reward(&self, snapshot: &SecuritySnapshot, backtest: Option<&BacktestResult>) -> Option<RiskReward> {
        risk_reward::risk_reward(snapshot, backtest)
    }

    pub fn options_flow(&self, options: &OptionsChainSummary, price: Option<f64>) -> OptionsFlow {
        options_flow::classify_flow(options, price, &self.config)
    }

    pub fn fibonacci_levels(&self, snapshot: &SecuritySnapshot) -> Option<FibonacciLevels> {
        technical_analysis::fibonacci_levels(snapshot.high_52w, snapshot.low_52w, snapshot.price)
    }

    pub fn risk_adjusted_metrics(&self, backtest: &BacktestResult) -> Option<RiskAdjustedMetrics> {
        backtest_engine::risk_adjusted_metrics(backtest)
    }

    /// Run every analysis over one security.
    pub fn build_report(&self, request: &ReportRequest) -> SecurityReport {
        let inputs = request.prepare();
        let snapshot = &inputs.snapshot;
        let backtest = inputs.backtest.as_ref();

        let signal = self.unified_signal(&snapshot.indicators, snapshot.price);
        let report = SecurityReport {
            symbol: snapshot.symbol.clone(),
            price: snapshot.price,
            quality: request.commentary.as_ref().map(|c| self.assess_quality(c)),
            risk: self.assess_risk(snapshot),
            valuation: self.assess_valuation(snapshot),
            technical_summary: self.technical_summary(&snapshot.indicators, snapshot.price),
            signal,
            momentum: self.momentum_score(&snapshot.performance),
            alerts: self.price_alerts(snapshot, backtest),
            risk_reward: self.risk_reward(snapshot, backtest),
            options_flow: inputs
                .options
                .as_ref()
                .map(|o| self.options_flow(o, snapshot.price)),
            fibonacci: self.fibonacci_levels(snapshot),
            backtest: inputs.backtest.clone(),
            risk_metrics: backtest.and_then(|b| self.risk_adjusted_metrics(b)),
            generated_at: Utc::now(),
        };

        debug!(
            symbol = %report.symbol,
            signal = report.signal.signal.as_str(),
            risk = report.risk.risk_level.as_str(),
            alerts = report.alerts.len(),
            "Built security report"
        );

        report
    }
}
