use analysis_core::{known, Bias, EngineConfig, TechnicalIndicatorSet};
use serde::{Deserialize, Serialize};

/// Coarse technical read with one human-readable line per rule evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSummary {
    pub signal: Bias,
    /// |bullish - bearish| weighted points
    pub strength: i32,
    pub details: Vec<String>,
}

impl Default for TechnicalSummary {
    fn default() -> Self {
        Self {
            signal: Bias::Neutral,
            strength: 0,
            details: Vec::new(),
        }
    }
}

/// Narrative technical summary.
///
/// RSI and the 20/50 alignment weigh 2, the 200-day SMA, MACD and Bollinger
/// bands weigh 1. The volume ratio only adds a detail line. Price-dependent
/// rules are skipped without a price. The label needs a margin of more than
/// two points either way.
pub fn technical_summary(
    indicators: &TechnicalIndicatorSet,
    price: Option<f64>,
    config: &EngineConfig,
) -> TechnicalSummary {
    if indicators.is_empty() {
        return TechnicalSummary::default();
    }

    let price = known(price);
    let mut bullish: i32 = 0;
    let mut bearish: i32 = 0;
    let mut details = Vec::new();

    if let Some(rsi) = known(indicators.rsi) {
        if rsi < config.rsi_oversold {
            bullish += 2;
            details.push(format!("RSI: {rsi:.1} - Oversold (Bullish)"));
        } else if rsi > config.rsi_overbought {
            bearish += 2;
            details.push(format!("RSI: {rsi:.1} - Overbought (Bearish)"));
        } else {
            details.push(format!("RSI: {rsi:.1} - Neutral"));
        }
    }

    if let (Some(p), Some(sma_20), Some(sma_50)) =
        (price, known(indicators.sma_20), known(indicators.sma_50))
    {
        if p > sma_20 && sma_20 > sma_50 {
            bullish += 2;
            details.push("MA Signal: Bullish (Price > 20 SMA > 50 SMA)".to_string());
        } else if p < sma_20 && sma_20 < sma_50 {
            bearish += 2;
            details.push("MA Signal: Bearish (Price < 20 SMA < 50 SMA)".to_string());
        }
    }

    if let (Some(p), Some(sma_200)) = (price, known(indicators.sma_200)) {
        if p > sma_200 {
            bullish += 1;
            details.push(format!("Long-term: Above 200 SMA (${sma_200:.2})"));
        } else {
            bearish += 1;
            details.push(format!("Long-term: Below 200 SMA (${sma_200:.2})"));
        }
    }

    if let Some(macd) = known(indicators.macd) {
        if macd > 0.0 {
            bullish += 1;
            details.push("MACD: Positive momentum".to_string());
        } else {
            bearish += 1;
            details.push("MACD: Negative momentum".to_string());
        }
    }

    if let (Some(p), Some(upper), Some(lower)) = (
        price,
        known(indicators.bollinger_upper),
        known(indicators.bollinger_lower),
    ) {
        // Upper band first here, unlike the unified signal
        if p >= upper {
            bearish += 1;
            details.push("Bollinger: At upper band (Overbought)".to_string());
        } else if p <= lower {
            bullish += 1;
            details.push("Bollinger: At lower band (Oversold)".to_string());
        }
    }

    if let Some(ratio) = known(indicators.volume_ratio) {
        if ratio > config.high_volume_threshold {
            details.push(format!("Volume: {ratio:.1}x average (High interest)"));
        } else if ratio < config.low_volume_threshold {
            details.push(format!("Volume: {ratio:.1}x average (Low interest)"));
        }
    }

    let signal = if bullish > bearish + 2 {
        Bias::Bullish
    } else if bearish > bullish + 2 {
        Bias::Bearish
    } else {
        Bias::Neutral
    };

    TechnicalSummary {
        signal,
        strength: (bullish - bearish).abs(),
        details,
    }
}
