use analysis_core::config::FIBONACCI_RATIOS;
use analysis_core::{positive, round_to};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    /// Retracement percentage label, e.g. `"61.8"`
    pub label: String,
    pub ratio: f64,
    pub price: f64,
}

/// Retracement grid over the 52-week range and the level nearest to price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub levels: Vec<FibLevel>,
    pub nearest_level: String,
    pub nearest_level_price: f64,
    /// Distance to the nearest level as a percentage of price
    pub distance_pct: f64,
}

impl FibonacciLevels {
    pub fn level(&self, label: &str) -> Option<&FibLevel> {
        self.levels.iter().find(|l| l.label == label)
    }
}

/// Standard retracement levels measured down from `high`.
///
/// Returns `None` when any input is missing or non-positive, or when the
/// range has no width.
pub fn fibonacci_levels(high: Option<f64>, low: Option<f64>, price: Option<f64>) -> Option<FibonacciLevels> {
    let high = positive(high)?;
    let low = positive(low)?;
    let price = positive(price)?;
    if high <= low {
        return None;
    }

    let diff = high - low;
    let raw: Vec<(&str, f64, f64)> = FIBONACCI_RATIOS
        .iter()
        .map(|&(label, ratio)| {
            // Pin the endpoints to the range instead of re-deriving them
            let level = if ratio <= 0.0 {
                high
            } else if ratio >= 1.0 {
                low
            } else {
                high - diff * ratio
            };
            (label, ratio, level)
        })
        .collect();

    // Strict comparison keeps the first level on ties
    let mut nearest = raw[0];
    let mut nearest_dist = (price - nearest.2).abs();
    for &candidate in raw.iter().skip(1) {
        let dist = (price - candidate.2).abs();
        if dist < nearest_dist {
            nearest = candidate;
            nearest_dist = dist;
        }
    }

    Some(FibonacciLevels {
        levels: raw
            .iter()
            .map(|&(label, ratio, level)| FibLevel {
                label: label.to_string(),
                ratio,
                price: round_to(level, 2),
            })
            .collect(),
        nearest_level: nearest.0.to_string(),
        nearest_level_price: round_to(nearest.2, 2),
        distance_pct: round_to(nearest_dist / price * 100.0, 2),
    })
}
