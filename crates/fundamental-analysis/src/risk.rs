use analysis_core::config::{COLOR_RISK_HIGH, COLOR_RISK_LOW, COLOR_RISK_MODERATE, COLOR_RISK_VERY_HIGH};
use analysis_core::{format_number, known, SecuritySnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "LOWER")]
    Lower,
}

impl RiskLevel {
    pub fn from_score(score: i32) -> Self {
        if score >= 70 {
            RiskLevel::VeryHigh
        } else if score >= 50 {
            RiskLevel::High
        } else if score >= 30 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Lower
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryHigh => "VERY HIGH",
            RiskLevel::High => "HIGH",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Lower => "LOWER",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            RiskLevel::VeryHigh => COLOR_RISK_VERY_HIGH,
            RiskLevel::High => COLOR_RISK_HIGH,
            RiskLevel::Moderate => COLOR_RISK_MODERATE,
            RiskLevel::Lower => COLOR_RISK_LOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Additive, unclamped
    pub risk_score: i32,
    pub risk_factors: Vec<String>,
    pub color: u32,
}

fn beta_factor(beta: f64) -> (i32, String) {
    if beta > 2.0 {
        (30, format!("[-] Very High Vol (beta = {beta:.2})"))
    } else if beta > 1.5 {
        (20, format!("[!] High Vol (beta = {beta:.2})"))
    } else if beta < 0.5 {
        (5, format!("[+] Low Vol (beta = {beta:.2})"))
    } else {
        (10, format!("[~] Moderate Vol (beta = {beta:.2})"))
    }
}

fn debt_factor(debt_to_equity: f64) -> (i32, String) {
    if debt_to_equity > 2.0 {
        (25, format!("[-] High Debt (D/E = {debt_to_equity:.2})"))
    } else if debt_to_equity > 1.0 {
        (15, format!("[!] Moderate Debt (D/E = {debt_to_equity:.2})"))
    } else {
        (5, format!("[+] Low Debt (D/E = {debt_to_equity:.2})"))
    }
}

fn liquidity_factor(current_ratio: f64) -> (i32, String) {
    if current_ratio < 1.0 {
        (20, format!("[-] Liquidity Risk (CR = {current_ratio:.2})"))
    } else if current_ratio < 1.5 {
        (10, format!("[!] Tight Liquidity (CR = {current_ratio:.2})"))
    } else {
        (3, format!("[+] Good Liquidity (CR = {current_ratio:.2})"))
    }
}

fn margin_factor(profit_margin: f64) -> (i32, String) {
    let pct = profit_margin * 100.0;
    if profit_margin < 0.0 {
        (25, format!("[-] Unprofitable ({pct:.1}% margin)"))
    } else if profit_margin < 0.05 {
        (15, format!("[!] Low Margins ({pct:.1}%)"))
    } else {
        (5, format!("[+] Profitable ({pct:.1}% margin)"))
    }
}

fn market_cap_factor(market_cap: f64) -> (i32, String) {
    let cap = format_number(Some(market_cap));
    if market_cap < 300_000_000.0 {
        (25, format!("[-] Micro Cap {cap} (Extreme Risk)"))
    } else if market_cap < 2_000_000_000.0 {
        (15, format!("[!] Small Cap {cap} (High Risk)"))
    } else if market_cap < 10_000_000_000.0 {
        (8, format!("[~] Mid Cap {cap} (Moderate Risk)"))
    } else {
        (3, format!("[+] Large Cap {cap} (Lower Risk)"))
    }
}

/// Score volatility, leverage, liquidity, profitability and size risk.
///
/// Factors are evaluated in that order and each one is skipped when its
/// field is absent. An empty snapshot scores 0 (LOWER).
pub fn assess_risk(snapshot: &SecuritySnapshot) -> RiskAssessment {
    let factors = [
        known(snapshot.beta).map(beta_factor),
        known(snapshot.debt_to_equity).map(debt_factor),
        known(snapshot.current_ratio).map(liquidity_factor),
        known(snapshot.profit_margin).map(margin_factor),
        known(snapshot.market_cap).map(market_cap_factor),
    ];

    let mut risk_score = 0;
    let mut risk_factors = Vec::new();
    for (points, description) in factors.into_iter().flatten() {
        risk_score += points;
        risk_factors.push(description);
    }

    let risk_level = RiskLevel::from_score(risk_score);
    RiskAssessment {
        risk_level,
        risk_score,
        risk_factors,
        color: risk_level.color(),
    }
}
