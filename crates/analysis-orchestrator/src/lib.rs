//! Combines the technical, fundamental, commentary and options scorers into
//! one [`AnalysisEngine`] and a serialisable [`SecurityReport`].

pub mod alerts;
pub mod engine;
pub mod report;
pub mod risk_reward;


pub use alerts::price_alerts;
pub use engine::AnalysisEngine;
pub use report::{PreparedInputs, ReportRequest, SecurityReport};
pub use risk_reward::{risk_reward, RiskReward, RiskRewardRating};
