use analysis_core::config::{RR_EXCELLENT, RR_FAIR, RR_GOOD};
use analysis_core::{known, positive, round_to, BacktestResult, SecuritySnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskRewardRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl RiskRewardRating {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > RR_EXCELLENT {
            RiskRewardRating::Excellent
        } else if ratio > RR_GOOD {
            RiskRewardRating::Good
        } else if ratio > RR_FAIR {
            RiskRewardRating::Fair
        } else {
            RiskRewardRating::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskRewardRating::Excellent => "EXCELLENT",
            RiskRewardRating::Good => "GOOD",
            RiskRewardRating::Fair => "FAIR",
            RiskRewardRating::Poor => "POOR",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            RiskRewardRating::Excellent | RiskRewardRating::Good => "[+]",
            RiskRewardRating::Fair => "[~]",
            RiskRewardRating::Poor => "[-]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReward {
    pub ratio: f64,
    pub upside_pct: f64,
    pub downside_pct: f64,
    pub rating: RiskRewardRating,
    pub glyph: String,
}

/// Upside to the price target against the historical max drawdown.
///
/// `None` without a backtest, a positive target, or a positive price. A
/// backtest with no drawdown figure counts as zero downside, which rates
/// POOR with a ratio of 0.
pub fn risk_reward(snapshot: &SecuritySnapshot, backtest: Option<&BacktestResult>) -> Option<RiskReward> {
    let backtest = backtest?;
    let target = positive(snapshot.price_target)?;
    let price = positive(snapshot.price)?;

    let upside = (target - price) / price * 100.0;
    let downside = known(backtest.max_drawdown).map(f64::abs).unwrap_or(0.0);
    let ratio = if downside > 0.0 { upside / downside } else { 0.0 };

    let rating = RiskRewardRating::from_ratio(ratio);
    Some(RiskReward {
        ratio: round_to(ratio, 2),
        upside_pct: round_to(upside, 1),
        downside_pct: round_to(downside, 1),
        rating,
        glyph: rating.glyph().to_string(),
    })
}
