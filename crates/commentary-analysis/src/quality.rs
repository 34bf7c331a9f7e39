//! Quality scoring for user-submitted commentary.
//!
//! Points come from body length, engagement, the author's flair, and the
//! credibility of the community the post came from. Every record gets a flat
//! time-relevance bonus.

use analysis_core::config::{
    COLOR_PREMIUM, COLOR_QUALITY, COLOR_STANDARD, HIGH_TRUST_COMMUNITIES, PREMIUM_QUALITY_SCORE,
    QUALITY_TIER_SCORE, SECOND_TIER_COMMUNITIES,
};
use analysis_core::CommentaryRecord;
use serde::{Deserialize, Serialize};

const TIME_RELEVANCE_BONUS: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityTier {
    Premium,
    Quality,
    Standard,
}

impl QualityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= PREMIUM_QUALITY_SCORE {
            QualityTier::Premium
        } else if score >= QUALITY_TIER_SCORE {
            QualityTier::Quality
        } else {
            QualityTier::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Premium => "PREMIUM",
            QualityTier::Quality => "QUALITY",
            QualityTier::Standard => "STANDARD",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            QualityTier::Premium => COLOR_PREMIUM,
            QualityTier::Quality => COLOR_QUALITY,
            QualityTier::Standard => COLOR_STANDARD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub score: f64,
    pub tier: QualityTier,
    pub color: u32,
}

fn length_points(text_length: u64) -> f64 {
    match text_length {
        l if l > 2000 => 25.0,
        l if l > 1000 => 20.0,
        l if l > 500 => 15.0,
        l if l > 200 => 10.0,
        _ => 0.0,
    }
}

fn upvote_points(upvotes: i64) -> f64 {
    match upvotes {
        u if u > 500 => 15.0,
        u if u > 100 => 10.0,
        u if u > 50 => 5.0,
        _ => 0.0,
    }
}

fn comment_points(comments: i64) -> f64 {
    match comments {
        c if c > 100 => 10.0,
        c if c > 50 => 7.0,
        c if c > 20 => 5.0,
        _ => 0.0,
    }
}

/// First matching tag wins, compared case-insensitively as a substring.
fn flair_points(flair: Option<&str>) -> f64 {
    let flair = flair.unwrap_or_default().to_lowercase();
    if flair.contains("dd") || flair.contains("due diligence") {
        15.0
    } else if flair.contains("analysis") {
        10.0
    } else if flair.contains("discussion") {
        5.0
    } else {
        0.0
    }
}

fn community_points(community: Option<&str>) -> f64 {
    let community = community.unwrap_or_default().to_lowercase();
    if HIGH_TRUST_COMMUNITIES.contains(&community.as_str()) {
        15.0
    } else if SECOND_TIER_COMMUNITIES.contains(&community.as_str()) {
        12.0
    } else {
        8.0
    }
}

/// 0-100 quality score. A default record scores 18 (baseline community
/// credibility plus the time bonus).
pub fn quality_score(record: &CommentaryRecord) -> f64 {
    let ratio = if record.upvote_ratio.is_finite() {
        record.upvote_ratio
    } else {
        0.0
    };

    let score = length_points(record.text_length)
        + upvote_points(record.upvotes)
        + comment_points(record.comment_count)
        + ratio * 10.0
        + flair_points(record.flair.as_deref())
        + community_points(record.community.as_deref())
        + TIME_RELEVANCE_BONUS;

    score.clamp(0.0, MAX_SCORE)
}

pub fn assess_quality(record: &CommentaryRecord) -> QualityAssessment {
    let score = quality_score(record);
    let tier = QualityTier::from_score(score);
    QualityAssessment {
        score,
        tier,
        color: tier.color(),
    }
}
