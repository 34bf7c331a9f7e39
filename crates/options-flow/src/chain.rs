use std::collections::BTreeMap;

use analysis_core::config::{OPTIONS_MAX_UNUSUAL_STRIKES, OPTIONS_UNUSUAL_VOLUME_THRESHOLD};
use analysis_core::{round_to, OptionType, OptionsChainSummary, UnusualStrike};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One contract row from a single-expiry chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: f64,
    #[serde(default)]
    pub volume: u64,
    #[serde(default, alias = "openInterest")]
    pub open_interest: u64,
}

/// Strike keyed in cents so equal strikes from both sides merge.
fn strike_key(strike: f64) -> i64 {
    (strike * 100.0).round() as i64
}

/// Strike at which option holders collect the least intrinsic value at
/// expiry. Ties go to the lowest strike. `None` for an empty chain.
pub fn max_pain(contracts: &[OptionContract]) -> Option<f64> {
    // strike -> (call OI, put OI)
    let mut strike_oi: BTreeMap<i64, (f64, f64)> = BTreeMap::new();
    for contract in contracts.iter().filter(|c| c.strike.is_finite()) {
        let entry = strike_oi.entry(strike_key(contract.strike)).or_insert((0.0, 0.0));
        match contract.option_type {
            OptionType::Call => entry.0 += contract.open_interest as f64,
            OptionType::Put => entry.1 += contract.open_interest as f64,
        }
    }

    let mut best: Option<(i64, f64)> = None;
    for &test_key in strike_oi.keys() {
        let test_price = test_key as f64 / 100.0;
        let pain: f64 = strike_oi
            .iter()
            .map(|(&key, &(call_oi, put_oi))| {
                let strike = key as f64 / 100.0;
                call_oi * (test_price - strike).max(0.0) + put_oi * (strike - test_price).max(0.0)
            })
            .sum();

        if best.map_or(true, |(_, min_pain)| pain < min_pain) {
            best = Some((test_key, pain));
        }
    }

    best.map(|(key, _)| key as f64 / 100.0)
}

fn unusual_strike(contract: &OptionContract) -> Option<UnusualStrike> {
    if contract.open_interest == 0 || contract.volume == 0 {
        return None;
    }
    let ratio = contract.volume as f64 / contract.open_interest as f64;
    if ratio < OPTIONS_UNUSUAL_VOLUME_THRESHOLD {
        return None;
    }
    Some(UnusualStrike {
        option_type: contract.option_type,
        strike: contract.strike,
        volume: contract.volume,
        open_interest: contract.open_interest,
        ratio: round_to(ratio, 1),
    })
}

/// Aggregate a raw chain into the summary the flow classifier reads.
///
/// Unusual strikes are collected calls first, then puts, and stably sorted
/// by ratio so equal ratios keep that order.
pub fn summarize_chain(contracts: &[OptionContract], expiry: impl Into<String>) -> OptionsChainSummary {
    let mut summary = OptionsChainSummary {
        expiry: expiry.into(),
        ..Default::default()
    };

    for contract in contracts {
        match contract.option_type {
            OptionType::Call => {
                summary.total_call_volume += contract.volume;
                summary.total_call_oi += contract.open_interest;
            }
            OptionType::Put => {
                summary.total_put_volume += contract.volume;
                summary.total_put_oi += contract.open_interest;
            }
        }
    }

    if summary.total_call_volume > 0 {
        summary.pc_ratio = Some(round_to(
            summary.total_put_volume as f64 / summary.total_call_volume as f64,
            2,
        ));
    }

    summary.max_pain = max_pain(contracts);

    let mut unusual: Vec<UnusualStrike> = [OptionType::Call, OptionType::Put]
        .iter()
        .flat_map(|side| {
            contracts
                .iter()
                .filter(move |c| c.option_type == *side)
                .filter_map(unusual_strike)
        })
        .collect();
    unusual.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(std::cmp::Ordering::Equal));
    unusual.truncate(OPTIONS_MAX_UNUSUAL_STRIKES);
    summary.unusual_strikes = unusual;

    trace!(
        contracts = contracts.len(),
        unusual = summary.unusual_strikes.len(),
        "summarized options chain"
    );

    summary
}
