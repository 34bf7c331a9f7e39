pub mod quality;

pub use quality::{assess_quality, quality_score, QualityAssessment, QualityTier};
