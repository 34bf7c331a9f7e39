//! Per-indicator classifiers and the weighted BUY/SELL/HOLD aggregator.

use analysis_core::config::{SIGNAL_MAX_REASONS, SIGNAL_NET_THRESHOLD};
use analysis_core::{known, positive, Bias, EngineConfig, TechnicalIndicatorSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const RSI_WEIGHT: i32 = 2;
pub const MACD_WEIGHT: i32 = 2;
pub const MA_ALIGNMENT_WEIGHT: i32 = 2;
pub const SMA_200_WEIGHT: i32 = 1;
pub const BOLLINGER_WEIGHT: i32 = 1;
pub const ADX_WEIGHT: i32 = 2;
pub const ICHIMOKU_WEIGHT: i32 = 2;
pub const VWAP_WEIGHT: i32 = 1;

/// RSI against the oversold/overbought bands.
pub fn rsi_bias(rsi: f64, config: &EngineConfig) -> Bias {
    if rsi < config.rsi_oversold {
        Bias::Bullish
    } else if rsi > config.rsi_overbought {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

/// MACD line sign. Zero counts as bearish.
pub fn macd_bias(macd: f64) -> Bias {
    if macd > 0.0 {
        Bias::Bullish
    } else {
        Bias::Bearish
    }
}

/// Stacked ordering `price > SMA20 > SMA50` (or the reverse).
pub fn ma_alignment_bias(price: f64, sma_20: f64, sma_50: f64) -> Bias {
    if price > sma_20 && sma_20 > sma_50 {
        Bias::Bullish
    } else if price < sma_20 && sma_20 < sma_50 {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

/// Price strictly above a reference level is bullish, anything else bearish.
/// Used for the 200-day SMA and VWAP.
pub fn level_bias(price: f64, level: f64) -> Bias {
    if price > level {
        Bias::Bullish
    } else {
        Bias::Bearish
    }
}

/// Band touch. The lower band is checked first.
pub fn bollinger_bias(price: f64, upper: f64, lower: f64) -> Bias {
    if price <= lower {
        Bias::Bullish
    } else if price >= upper {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

/// Directional read from +DI/-DI, only when ADX says the market is trending.
pub fn adx_bias(adx: f64, plus_di: f64, minus_di: f64, config: &EngineConfig) -> Option<Bias> {
    if adx < config.adx_trending_threshold {
        return None;
    }
    Some(if plus_di > minus_di { Bias::Bullish } else { Bias::Bearish })
}

/// Price position relative to the cloud formed by senkou span A/B.
pub fn ichimoku_bias(price: f64, senkou_a: f64, senkou_b: f64) -> Bias {
    let cloud_top = senkou_a.max(senkou_b);
    let cloud_bottom = senkou_a.min(senkou_b);
    if price > cloud_top {
        Bias::Bullish
    } else if price < cloud_bottom {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
}

impl TradeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSignal::Buy => "BUY",
            TradeSignal::Sell => "SELL",
            TradeSignal::Hold => "HOLD",
        }
    }
}

/// Weighted vote across all available indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSignal {
    pub signal: TradeSignal,
    /// |net| / total weight, as a rounded percentage (0-100)
    pub confidence: u32,
    /// First contributing rule descriptions, in evaluation order
    pub reasons: Vec<String>,
    pub bullish_count: i32,
    pub bearish_count: i32,
    /// Total weight of the indicators that were evaluated
    pub total_checks: i32,
}

impl UnifiedSignal {
    /// Result when nothing could be evaluated
    pub fn hold() -> Self {
        Self {
            signal: TradeSignal::Hold,
            confidence: 0,
            reasons: Vec::new(),
            bullish_count: 0,
            bearish_count: 0,
            total_checks: 0,
        }
    }

    pub fn net(&self) -> i32 {
        self.bullish_count - self.bearish_count
    }
}

/// One evaluated indicator group. `reason` is set only when it voted.
struct Check {
    weight: i32,
    bias: Bias,
    reason: Option<String>,
}

impl Check {
    fn new(weight: i32, bias: Bias, bullish: impl Into<String>, bearish: impl Into<String>) -> Self {
        let reason = match bias {
            Bias::Bullish => Some(bullish.into()),
            Bias::Bearish => Some(bearish.into()),
            Bias::Neutral => None,
        };
        Self { weight, bias, reason }
    }
}

fn collect_checks(ind: &TechnicalIndicatorSet, price: f64, config: &EngineConfig) -> Vec<Check> {
    let mut checks = Vec::new();

    if let Some(rsi) = known(ind.rsi) {
        checks.push(Check::new(
            RSI_WEIGHT,
            rsi_bias(rsi, config),
            format!("RSI oversold ({rsi:.0})"),
            format!("RSI overbought ({rsi:.0})"),
        ));
    }

    if let Some(macd) = known(ind.macd) {
        checks.push(Check::new(MACD_WEIGHT, macd_bias(macd), "MACD bullish", "MACD bearish"));
    }

    if let (Some(sma_20), Some(sma_50)) = (known(ind.sma_20), known(ind.sma_50)) {
        checks.push(Check::new(
            MA_ALIGNMENT_WEIGHT,
            ma_alignment_bias(price, sma_20, sma_50),
            "Above 20/50 SMA",
            "Below 20/50 SMA",
        ));
    }

    if let Some(sma_200) = known(ind.sma_200) {
        checks.push(Check::new(
            SMA_200_WEIGHT,
            level_bias(price, sma_200),
            "Above 200 SMA",
            "Below 200 SMA",
        ));
    }

    if let (Some(upper), Some(lower)) = (known(ind.bollinger_upper), known(ind.bollinger_lower)) {
        checks.push(Check::new(
            BOLLINGER_WEIGHT,
            bollinger_bias(price, upper, lower),
            "At lower Bollinger",
            "At upper Bollinger",
        ));
    }

    if let (Some(adx), Some(plus_di), Some(minus_di)) =
        (known(ind.adx), known(ind.plus_di), known(ind.minus_di))
    {
        if let Some(bias) = adx_bias(adx, plus_di, minus_di, config) {
            checks.push(Check::new(
                ADX_WEIGHT,
                bias,
                format!("ADX trending bullish ({adx:.0})"),
                format!("ADX trending bearish ({adx:.0})"),
            ));
        }
    }

    if let (Some(senkou_a), Some(senkou_b)) = (known(ind.ichimoku_senkou_a), known(ind.ichimoku_senkou_b)) {
        checks.push(Check::new(
            ICHIMOKU_WEIGHT,
            ichimoku_bias(price, senkou_a, senkou_b),
            "Above Ichimoku cloud",
            "Below Ichimoku cloud",
        ));
    }

    if let Some(vwap) = known(ind.vwap) {
        checks.push(Check::new(VWAP_WEIGHT, level_bias(price, vwap), "Above VWAP", "Below VWAP"));
    }

    checks
}

/// Combine RSI, MACD, moving averages, Bollinger, ADX/DI, Ichimoku and VWAP
/// into a single BUY/SELL/HOLD call.
///
/// A present indicator adds its weight to the total even when it casts no
/// vote, so neutral readings dilute the confidence. A missing or
/// non-positive price, or an empty indicator set, yields [`UnifiedSignal::hold`].
pub fn unified_signal(
    indicators: &TechnicalIndicatorSet,
    price: Option<f64>,
    config: &EngineConfig,
) -> UnifiedSignal {
    let Some(price) = positive(price) else {
        return UnifiedSignal::hold();
    };
    if indicators.is_empty() {
        return UnifiedSignal::hold();
    }

    let checks = collect_checks(indicators, price, config);
    let total_weight: i32 = checks.iter().map(|c| c.weight).sum();
    if total_weight == 0 {
        return UnifiedSignal::hold();
    }

    let tally = |bias: Bias| -> i32 {
        checks.iter().filter(|c| c.bias == bias).map(|c| c.weight).sum()
    };
    let bullish = tally(Bias::Bullish);
    let bearish = tally(Bias::Bearish);
    let net = bullish - bearish;

    let confidence = (net.abs() as f64 / total_weight as f64).min(1.0);
    let confidence_pct = (confidence * 100.0).round_ties_even() as u32;

    let signal = if net >= SIGNAL_NET_THRESHOLD {
        TradeSignal::Buy
    } else if net <= -SIGNAL_NET_THRESHOLD {
        TradeSignal::Sell
    } else {
        TradeSignal::Hold
    };

    debug!(bullish, bearish, total_weight, signal = signal.as_str(), "unified signal tally");

    UnifiedSignal {
        signal,
        confidence: confidence_pct,
        reasons: checks
            .into_iter()
            .filter_map(|c| c.reason)
            .take(SIGNAL_MAX_REASONS)
            .collect(),
        bullish_count: bullish,
        bearish_count: bearish,
        total_checks: total_weight,
    }
}
