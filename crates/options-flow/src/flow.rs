use analysis_core::config::{MAX_PAIN_DRIFT_PCT, OPTIONS_LARGE_BET_VOLUME};
use analysis_core::{known, positive, EngineConfig, OptionType, OptionsChainSummary, UnusualStrike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowClass {
    #[serde(rename = "BULLISH_FLOW")]
    BullishFlow,
    #[serde(rename = "BEARISH_FLOW")]
    BearishFlow,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl FlowClass {
    /// One point of margin is not enough to call a direction.
    pub fn from_points(bullish: u32, bearish: u32) -> Self {
        if bullish > bearish + 1 {
            FlowClass::BullishFlow
        } else if bearish > bullish + 1 {
            FlowClass::BearishFlow
        } else {
            FlowClass::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowClass::BullishFlow => "BULLISH_FLOW",
            FlowClass::BearishFlow => "BEARISH_FLOW",
            FlowClass::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsFlow {
    pub flow: FlowClass,
    pub pc_ratio: Option<f64>,
    pub max_pain: Option<f64>,
    pub unusual_strikes: Vec<UnusualStrike>,
    pub signals: Vec<String>,
    pub expiry: String,
    pub bullish_points: u32,
    pub bearish_points: u32,
}

fn strike_label(strike: &UnusualStrike) -> String {
    format!(
        "${:.0}{} {:.1}x OI",
        strike.strike,
        strike.option_type.suffix(),
        strike.ratio
    )
}

/// Classify positioning from the put/call ratio, max pain drift and
/// unusual strike activity.
///
/// The first CALL and first PUT in `unusual_strikes` (expected sorted by
/// ratio) each add a point. Every strike over the large-bet volume with a
/// ratio at the unusual threshold adds another, so one strike can count
/// twice.
pub fn classify_flow(options: &OptionsChainSummary, price: Option<f64>, config: &EngineConfig) -> OptionsFlow {
    let mut signals = Vec::new();
    let mut bullish_points = 0;
    let mut bearish_points = 0;

    let pc_ratio = known(options.pc_ratio);
    if let Some(pc) = pc_ratio {
        if pc < config.options_extreme_pc_low {
            signals.push(format!("P/C {pc:.2} (heavy call buying)"));
            bullish_points += 2;
        } else if pc > config.options_extreme_pc_high {
            signals.push(format!("P/C {pc:.2} (heavy put buying)"));
            bearish_points += 2;
        } else {
            signals.push(format!("P/C {pc:.2}"));
        }
    }

    let max_pain = known(options.max_pain);
    if let (Some(pain), Some(price)) = (positive(max_pain), positive(price)) {
        let diff_pct = (pain - price) / price * 100.0;
        if diff_pct > MAX_PAIN_DRIFT_PCT {
            signals.push(format!("Max Pain ${pain:.0} ({diff_pct:+.1}% above)"));
            bullish_points += 1;
        } else if diff_pct < -MAX_PAIN_DRIFT_PCT {
            signals.push(format!("Max Pain ${pain:.0} ({diff_pct:+.1}% below)"));
            bearish_points += 1;
        } else {
            signals.push(format!("Max Pain ${pain:.0}"));
        }
    }

    let first_of = |side: OptionType| options.unusual_strikes.iter().find(|u| u.option_type == side);
    if let Some(top_call) = first_of(OptionType::Call) {
        signals.push(strike_label(top_call));
        bullish_points += 1;
    }
    if let Some(top_put) = first_of(OptionType::Put) {
        signals.push(strike_label(top_put));
        bearish_points += 1;
    }

    for strike in &options.unusual_strikes {
        if strike.volume > OPTIONS_LARGE_BET_VOLUME && strike.ratio >= config.options_unusual_volume_threshold {
            match strike.option_type {
                OptionType::Call => bullish_points += 1,
                OptionType::Put => bearish_points += 1,
            }
        }
    }

    OptionsFlow {
        flow: FlowClass::from_points(bullish_points, bearish_points),
        pc_ratio,
        max_pain,
        unusual_strikes: options.unusual_strikes.clone(),
        signals,
        expiry: options.expiry.clone(),
        bullish_points,
        bearish_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unusual(option_type: OptionType, strike: f64, volume: u64, ratio: f64) -> UnusualStrike {
        UnusualStrike {
            option_type,
            strike,
            volume,
            open_interest: (volume as f64 / ratio) as u64,
            ratio,
        }
    }

    #[test]
    fn test_low_put_call_ratio_alone_is_bullish() {
        let options = OptionsChainSummary {
            pc_ratio: Some(0.3),
            ..Default::default()
        };
        let flow = classify_flow(&options, Some(100.0), &EngineConfig::default());

        assert_eq!(flow.bullish_points, 2);
        assert_eq!(flow.bearish_points, 0);
        assert_eq!(flow.flow, FlowClass::BullishFlow);
        assert_eq!(flow.signals, vec!["P/C 0.30 (heavy call buying)"]);
    }

    #[test]
    fn test_empty_summary_is_neutral() {
        let flow = classify_flow(&OptionsChainSummary::default(), None, &EngineConfig::default());
        assert_eq!(flow.flow, FlowClass::Neutral);
        assert!(flow.signals.is_empty());
        assert_eq!(flow.bullish_points + flow.bearish_points, 0);
    }

    #[test]
    fn test_max_pain_drift() {
        let above = OptionsChainSummary {
            max_pain: Some(110.0),
            ..Default::default()
        };
        let flow = classify_flow(&above, Some(100.0), &EngineConfig::default());
        assert_eq!(flow.signals, vec!["Max Pain $110 (+10.0% above)"]);
        assert_eq!(flow.bullish_points, 1);
        // One point is inside the margin
        assert_eq!(flow.flow, FlowClass::Neutral);

        let below = OptionsChainSummary {
            max_pain: Some(90.0),
            ..Default::default()
        };
        let flow = classify_flow(&below, Some(100.0), &EngineConfig::default());
        assert_eq!(flow.signals, vec!["Max Pain $90 (-10.0% below)"]);
        assert_eq!(flow.bearish_points, 1);

        let near = OptionsChainSummary {
            max_pain: Some(103.0),
            ..Default::default()
        };
        let flow = classify_flow(&near, Some(100.0), &EngineConfig::default());
        assert_eq!(flow.signals, vec!["Max Pain $103"]);

        // Skipped without a price
        let flow = classify_flow(&near, None, &EngineConfig::default());
        assert!(flow.signals.is_empty());
    }

    #[test]
    fn test_large_bets_count_on_top_of_leaders() {
        let options = OptionsChainSummary {
            pc_ratio: Some(1.8),
            unusual_strikes: vec![
                unusual(OptionType::Put, 95.0, 4000, 8.0),
                unusual(OptionType::Call, 150.0, 6200, 6.2),
                unusual(OptionType::Put, 90.0, 800, 5.5),
            ],
            expiry: "2026-11-20".to_string(),
            ..Default::default()
        };
        let flow = classify_flow(&options, Some(120.0), &EngineConfig::default());

        // Bearish: P/C 2 + top put 1 + 95P large bet 1; bullish: top call 1 + large bet 1
        assert_eq!(flow.bearish_points, 4);
        assert_eq!(flow.bullish_points, 2);
        assert_eq!(flow.flow, FlowClass::BearishFlow);
        assert_eq!(
            flow.signals,
            vec!["P/C 1.80 (heavy put buying)", "$150C 6.2x OI", "$95P 8.0x OI"]
        );
        assert_eq!(flow.expiry, "2026-11-20");
        assert_eq!(flow.unusual_strikes.len(), 3);
    }

    #[test]
    fn test_put_call_ratio_just_under_threshold_from_chain() {
        use crate::chain::{summarize_chain, OptionContract};

        // 99 / 200 is stored as 0.49499.. and rounds to 0.49
        let chain = vec![
            OptionContract {
                option_type: OptionType::Call,
                strike: 100.0,
                volume: 200,
                open_interest: 1000,
            },
            OptionContract {
                option_type: OptionType::Put,
                strike: 100.0,
                volume: 99,
                open_interest: 1000,
            },
        ];
        let summary = summarize_chain(&chain, "2026-11-20");
        assert_eq!(summary.pc_ratio, Some(0.49));

        let flow = classify_flow(&summary, None, &EngineConfig::default());
        assert_eq!(flow.bullish_points, 2);
        assert_eq!(flow.flow, FlowClass::BullishFlow);
    }

    #[test]
    fn test_flow_class_margin() {
        assert_eq!(FlowClass::from_points(3, 1), FlowClass::BullishFlow);
        assert_eq!(FlowClass::from_points(2, 1), FlowClass::Neutral);
        assert_eq!(FlowClass::from_points(0, 2), FlowClass::BearishFlow);
    }
}
