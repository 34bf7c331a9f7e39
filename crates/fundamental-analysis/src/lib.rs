//! Balance-sheet risk and valuation-multiple reads over a [`SecuritySnapshot`].
//!
//! [`SecuritySnapshot`]: analysis_core::SecuritySnapshot

pub mod risk;
pub mod valuation;

pub use risk::{assess_risk, RiskAssessment, RiskLevel};
pub use valuation::{assess_valuation, ValuationAssessment};
