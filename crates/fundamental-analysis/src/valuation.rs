use analysis_core::{known, SecuritySnapshot};
use serde::{Deserialize, Serialize};

pub const NO_CLEAR_SIGNAL: &str = "No clear valuation signal";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssessment {
    /// Qualitative reads in P/E, PEG, P/B order. Holds [`NO_CLEAR_SIGNAL`]
    /// alone when nothing fired.
    pub signals: Vec<String>,
}

impl ValuationAssessment {
    pub fn has_signal(&self) -> bool {
        !(self.signals.len() == 1 && self.signals[0] == NO_CLEAR_SIGNAL)
    }

    /// One signal per line
    pub fn summary(&self) -> String {
        self.signals.join("\n")
    }
}

fn pe_signal(pe: f64) -> Option<String> {
    if pe < 0.0 {
        Some("[!] Negative P/E (Unprofitable)".to_string())
    } else if pe < 15.0 {
        Some(format!("[OK] Low P/E ({pe:.1}) - Potentially undervalued"))
    } else if pe > 40.0 {
        Some(format!("[!] High P/E ({pe:.1}) - Potentially overvalued"))
    } else {
        None
    }
}

fn peg_signal(peg: f64) -> Option<String> {
    if peg < 1.0 {
        Some(format!("[OK] PEG < 1.0 ({peg:.2}) - Growth undervalued"))
    } else if peg > 2.0 {
        Some(format!("[!] PEG > 2.0 ({peg:.2}) - Growth overvalued"))
    } else {
        None
    }
}

fn pb_signal(pb: f64) -> Option<String> {
    if pb < 1.0 {
        Some(format!("[OK] P/B < 1.0 ({pb:.2}) - Trading below book value"))
    } else if pb > 5.0 {
        Some(format!("[!] P/B > 5.0 ({pb:.2}) - High premium to book"))
    } else {
        None
    }
}

/// Read P/E, PEG and P/B against fixed bands. P/E between 15 and 40 is
/// neutral and emits nothing.
pub fn assess_valuation(snapshot: &SecuritySnapshot) -> ValuationAssessment {
    let mut signals: Vec<String> = [
        known(snapshot.pe_ratio).and_then(pe_signal),
        known(snapshot.peg_ratio).and_then(peg_signal),
        known(snapshot.price_to_book).and_then(pb_signal),
    ]
    .into_iter()
    .flatten()
    .collect();

    if signals.is_empty() {
        signals.push(NO_CLEAR_SIGNAL.to_string());
    }

    ValuationAssessment { signals }
}
