use analysis_core::config::MOMENTUM_WEIGHTS;
use analysis_core::{round_to, MultiTimeframePerformance, Period};
use serde::{Deserialize, Serialize};

const NEUTRAL_SCORE: f64 = 50.0;
const ACCELERATION_FACTOR: f64 = 1.2;
const DECELERATION_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumClass {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

impl MomentumClass {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            MomentumClass::StrongBullish
        } else if score >= 60.0 {
            MomentumClass::Bullish
        } else if score >= 40.0 {
            MomentumClass::Neutral
        } else if score >= 25.0 {
            MomentumClass::Bearish
        } else {
            MomentumClass::StrongBearish
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumClass::StrongBullish => "STRONG_BULLISH",
            MomentumClass::Bullish => "BULLISH",
            MomentumClass::Neutral => "NEUTRAL",
            MomentumClass::Bearish => "BEARISH",
            MomentumClass::StrongBearish => "STRONG_BEARISH",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            MomentumClass::StrongBullish => "[++]",
            MomentumClass::Bullish => "[+]",
            MomentumClass::Neutral => "[~]",
            MomentumClass::Bearish => "[-]",
            MomentumClass::StrongBearish => "[--]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MomentumTrend {
    Accelerating,
    Decelerating,
    Stable,
    Unknown,
}

impl MomentumTrend {
    /// Compares the 1M return against the 3M return. A present zero counts
    /// as present, so `3M = 0` with any positive 1M reads as accelerating.
    pub fn from_returns(one_month: Option<f64>, three_months: Option<f64>) -> Self {
        match (one_month, three_months) {
            (Some(m1), Some(m3)) if m1 > m3 * ACCELERATION_FACTOR => MomentumTrend::Accelerating,
            (Some(m1), Some(m3)) if m1 < m3 * DECELERATION_FACTOR => MomentumTrend::Decelerating,
            (Some(_), Some(_)) => MomentumTrend::Stable,
            _ => MomentumTrend::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumScore {
    /// Weighted 0-100 score, one decimal
    pub score: f64,
    pub classification: MomentumClass,
    pub trend: MomentumTrend,
    pub glyph: String,
}

impl MomentumScore {
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            classification: MomentumClass::Neutral,
            trend: MomentumTrend::Unknown,
            glyph: MomentumClass::Neutral.glyph().to_string(),
        }
    }
}

/// Map a percentage return onto 0-100: -50% -> 0, 0% -> 50, +50% and up -> 100.
pub fn period_score(return_pct: f64) -> f64 {
    (return_pct + 50.0).clamp(0.0, 100.0)
}

/// Weighted momentum across the 1M..3Y returns, renormalised over the
/// periods that are present.
pub fn momentum_score(performance: &MultiTimeframePerformance) -> MomentumScore {
    let (weighted, total_weight) = MOMENTUM_WEIGHTS
        .iter()
        .filter_map(|&(period, weight)| performance.get(period).map(|ret| (ret, weight)))
        .fold((0.0, 0.0), |(sum, total), (ret, weight)| {
            (sum + period_score(ret) * weight, total + weight)
        });

    if total_weight == 0.0 {
        return MomentumScore::neutral();
    }

    let final_score = weighted / total_weight;
    let classification = MomentumClass::from_score(final_score);
    let trend = MomentumTrend::from_returns(
        performance.get(Period::OneMonth),
        performance.get(Period::ThreeMonths),
    );

    MomentumScore {
        score: round_to(final_score, 1),
        classification,
        trend,
        glyph: classification.glyph().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_all_periods_weighted() {
        let perf = MultiTimeframePerformance::default()
            .with(Period::OneMonth, 20.0)
            .with(Period::ThreeMonths, 0.0)
            .with(Period::SixMonths, -10.0)
            .with(Period::OneYear, 0.0)
            .with(Period::TwoYears, 0.0)
            .with(Period::ThreeYears, 0.0);

        // 0.30*70 + 0.25*50 + 0.20*40 + 0.15*50 + 0.05*50 + 0.05*50
        let result = momentum_score(&perf);
        assert_relative_eq!(result.score, 54.0);
        assert_eq!(result.classification, MomentumClass::Neutral);
        assert_eq!(result.trend, MomentumTrend::Accelerating);
        assert_eq!(result.glyph, "[~]");
    }

    #[test]
    fn test_empty_is_neutral_default() {
        let result = momentum_score(&MultiTimeframePerformance::default());
        assert_eq!(result, MomentumScore::neutral());
    }

    #[test]
    fn test_renormalises_over_present_periods() {
        // Only 1Y present: 40% -> 90, weight cancels out
        let perf = MultiTimeframePerformance::default().with(Period::OneYear, 40.0);
        let result = momentum_score(&perf);
        assert_relative_eq!(result.score, 90.0);
        assert_eq!(result.classification, MomentumClass::StrongBullish);
        assert_eq!(result.trend, MomentumTrend::Unknown);
    }

    #[test]
    fn test_saturation_and_strong_bearish() {
        let perf = MultiTimeframePerformance::default()
            .with(Period::OneMonth, -80.0)
            .with(Period::ThreeMonths, -60.0);
        let result = momentum_score(&perf);
        assert_relative_eq!(result.score, 0.0);
        assert_eq!(result.classification, MomentumClass::StrongBearish);
        // -80 < -60 * 0.8 = -48
        assert_eq!(result.trend, MomentumTrend::Decelerating);
        assert_eq!(result.glyph, "[--]");
    }

    #[test]
    fn test_trend_bands() {
        assert_eq!(MomentumTrend::from_returns(Some(10.0), Some(10.0)), MomentumTrend::Stable);
        assert_eq!(MomentumTrend::from_returns(Some(12.5), Some(10.0)), MomentumTrend::Accelerating);
        assert_eq!(MomentumTrend::from_returns(Some(7.0), Some(10.0)), MomentumTrend::Decelerating);
        assert_eq!(MomentumTrend::from_returns(Some(0.0), Some(0.0)), MomentumTrend::Stable);
        assert_eq!(MomentumTrend::from_returns(None, Some(3.0)), MomentumTrend::Unknown);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(MomentumClass::from_score(75.0), MomentumClass::StrongBullish);
        assert_eq!(MomentumClass::from_score(60.0), MomentumClass::Bullish);
        assert_eq!(MomentumClass::from_score(40.0), MomentumClass::Neutral);
        assert_eq!(MomentumClass::from_score(25.0), MomentumClass::Bearish);
        assert_eq!(MomentumClass::from_score(24.9), MomentumClass::StrongBearish);
    }
}
