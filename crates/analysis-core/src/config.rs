//! Thresholds and lookup tables used by the scorers.
//!
//! The constants are the shipped defaults. [`EngineConfig`] bundles the ones
//! that are meant to be tuned and can be overridden from `ANALYSIS_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::env;

use crate::{AnalysisError, Period};

// Oscillators
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const ADX_TRENDING_THRESHOLD: f64 = 25.0;

// Volume ratio bands for the narrative summary
pub const HIGH_VOLUME_THRESHOLD: f64 = 1.5;
pub const LOW_VOLUME_THRESHOLD: f64 = 0.5;

// Options flow
pub const OPTIONS_EXTREME_PC_LOW: f64 = 0.5;
pub const OPTIONS_EXTREME_PC_HIGH: f64 = 1.5;
pub const OPTIONS_UNUSUAL_VOLUME_THRESHOLD: f64 = 5.0;
/// Contracts traded above which an unusual strike counts as a large bet
pub const OPTIONS_LARGE_BET_VOLUME: u64 = 1000;
/// Max pain this far (%) from price implies drift toward it
pub const MAX_PAIN_DRIFT_PCT: f64 = 5.0;
pub const OPTIONS_MAX_UNUSUAL_STRIKES: usize = 3;

// Unified signal
pub const SIGNAL_NET_THRESHOLD: i32 = 3;
pub const SIGNAL_MAX_REASONS: usize = 5;

// Price alerts (percent distances)
pub const NEAR_52W_HIGH_PCT: f64 = 5.0;
pub const APPROACHING_52W_HIGH_PCT: f64 = 10.0;
pub const NEAR_52W_LOW_PCT: f64 = 5.0;
pub const SMA_200_TEST_BAND_PCT: f64 = 2.0;
pub const EXTREME_VOLUME_RATIO: f64 = 3.0;
pub const ALERT_VOLUME_RATIO: f64 = 2.0;
pub const DRAWDOWN_WARNING_PCT: f64 = -40.0;

// Risk/reward rating bands (upside / downside)
pub const RR_EXCELLENT: f64 = 3.0;
pub const RR_GOOD: f64 = 2.0;
pub const RR_FAIR: f64 = 1.0;

// Commentary quality
pub const PREMIUM_QUALITY_SCORE: f64 = 80.0;
pub const QUALITY_TIER_SCORE: f64 = 60.0;
pub const HIGH_TRUST_COMMUNITIES: &[&str] = &["wallstreetbets", "stocks", "investing"];
pub const SECOND_TIER_COMMUNITIES: &[&str] = &["options", "securityanalysis", "valueinvesting"];

// Backtest
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const RISK_FREE_RATE: f64 = 0.04;
/// Trailing bars that make up the 52-week range
pub const FIFTY_TWO_WEEK_BARS: usize = 252;

// Display colour tokens
pub const COLOR_RISK_LOW: u32 = 0x00FF00;
pub const COLOR_RISK_MODERATE: u32 = 0xFFCC00;
pub const COLOR_RISK_HIGH: u32 = 0xFF6600;
pub const COLOR_RISK_VERY_HIGH: u32 = 0xFF0000;
pub const COLOR_PREMIUM: u32 = 0xFFD700;
pub const COLOR_QUALITY: u32 = 0x00FF00;
pub const COLOR_STANDARD: u32 = 0x3498DB;

/// Momentum weight per lookback period. Recent performance counts most.
pub const MOMENTUM_WEIGHTS: [(Period, f64); 6] = [
    (Period::OneMonth, 0.30),
    (Period::ThreeMonths, 0.25),
    (Period::SixMonths, 0.20),
    (Period::OneYear, 0.15),
    (Period::TwoYears, 0.05),
    (Period::ThreeYears, 0.05),
];

/// Retracement ratios in reporting order, with their labels.
pub const FIBONACCI_RATIOS: [(&str, f64); 7] = [
    ("0.0", 0.0),
    ("23.6", 0.236),
    ("38.2", 0.382),
    ("50.0", 0.5),
    ("61.8", 0.618),
    ("78.6", 0.786),
    ("100.0", 1.0),
];

/// Tunable thresholds shared by every scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub adx_trending_threshold: f64,
    pub high_volume_threshold: f64,
    pub low_volume_threshold: f64,
    pub options_extreme_pc_low: f64,
    pub options_extreme_pc_high: f64,
    pub options_unusual_volume_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: RSI_OVERSOLD,
            rsi_overbought: RSI_OVERBOUGHT,
            adx_trending_threshold: ADX_TRENDING_THRESHOLD,
            high_volume_threshold: HIGH_VOLUME_THRESHOLD,
            low_volume_threshold: LOW_VOLUME_THRESHOLD,
            options_extreme_pc_low: OPTIONS_EXTREME_PC_LOW,
            options_extreme_pc_high: OPTIONS_EXTREME_PC_HIGH,
            options_unusual_volume_threshold: OPTIONS_UNUSUAL_VOLUME_THRESHOLD,
        }
    }
}

fn env_f64(key: &str, default: f64) -> Result<f64, AnalysisError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| AnalysisError::Config(format!("{key}={raw:?}: {e}"))),
        Err(_) => Ok(default),
    }
}

impl EngineConfig {
    /// Defaults overridden by any `ANALYSIS_*` variables that are set.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let base = Self::default();
        let config = Self {
            rsi_oversold: env_f64("ANALYSIS_RSI_OVERSOLD", base.rsi_oversold)?,
            rsi_overbought: env_f64("ANALYSIS_RSI_OVERBOUGHT", base.rsi_overbought)?,
            adx_trending_threshold: env_f64("ANALYSIS_ADX_TRENDING", base.adx_trending_threshold)?,
            high_volume_threshold: env_f64("ANALYSIS_HIGH_VOLUME", base.high_volume_threshold)?,
            low_volume_threshold: env_f64("ANALYSIS_LOW_VOLUME", base.low_volume_threshold)?,
            options_extreme_pc_low: env_f64("ANALYSIS_PC_LOW", base.options_extreme_pc_low)?,
            options_extreme_pc_high: env_f64("ANALYSIS_PC_HIGH", base.options_extreme_pc_high)?,
            options_unusual_volume_threshold: env_f64(
                "ANALYSIS_UNUSUAL_OPTIONS_RATIO",
                base.options_unusual_volume_threshold,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject band definitions that would make the classifiers meaningless.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(AnalysisError::Config(format!(
                "rsi_oversold ({}) must be below rsi_overbought ({})",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if self.low_volume_threshold >= self.high_volume_threshold {
            return Err(AnalysisError::Config(format!(
                "low_volume_threshold ({}) must be below high_volume_threshold ({})",
                self.low_volume_threshold, self.high_volume_threshold
            )));
        }
        if self.options_extreme_pc_low >= self.options_extreme_pc_high {
            return Err(AnalysisError::Config(format!(
                "options_extreme_pc_low ({}) must be below options_extreme_pc_high ({})",
                self.options_extreme_pc_low, self.options_extreme_pc_high
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_momentum_weights_sum_to_one() {
        let total: f64 = MOMENTUM_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rsi_oversold, 30.0);
        assert_eq!(config.options_extreme_pc_high, 1.5);
    }

    #[test]
    fn test_inverted_bands_rejected() {
        let config = EngineConfig {
            rsi_oversold: 75.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));
    }

    #[test]
    fn test_partial_json_config_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"rsi_oversold": 25.0}"#).unwrap();
        assert_eq!(config.rsi_oversold, 25.0);
        assert_eq!(config.rsi_overbought, RSI_OVERBOUGHT);
    }
}
