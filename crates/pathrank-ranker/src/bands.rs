//! Absolute score bands for a single entity (detail cards, donut charts).
//! Unlike the batch bucketer, this works on one score with fixed thresholds
//! and has an explicit band for scores that cannot be parsed.

use pathrank_common::entities::coerce_score;
use pathrank_common::MatchTier;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Best,
    Good,
    Fair,
    Least,
    Unknown,
}

impl ScoreBand {
    /// Band for a numeric score.
    ///
    /// | Score  | Band  |
    /// |--------|-------|
    /// | >= 80  | best  |
    /// | >= 70  | good  |
    /// | >= 50  | fair  |
    /// | < 50   | least |
    pub fn for_score(score: f64) -> Self {
        match score {
            s if s.is_nan() => ScoreBand::Unknown,
            s if s >= 80.0 => ScoreBand::Best,
            s if s >= 70.0 => ScoreBand::Good,
            s if s >= 50.0 => ScoreBand::Fair,
            _ => ScoreBand::Least,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ScoreBand::Best => "best",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Least => "least",
            ScoreBand::Unknown => "unknown",
        }
    }

    /// Short label shown inside the donut.
    pub fn donut_label(&self) -> &'static str {
        match self {
            ScoreBand::Best => "Strong",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::Least => "Weak",
            ScoreBand::Unknown => "N/A",
        }
    }

    /// Matching tier, if the score was usable.
    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            ScoreBand::Best => Some(MatchTier::Best),
            ScoreBand::Good => Some(MatchTier::Good),
            ScoreBand::Fair => Some(MatchTier::Fair),
            ScoreBand::Least => Some(MatchTier::Weak),
            ScoreBand::Unknown => None,
        }
    }

    pub fn style(&self) -> &'static str {
        match self.tier() {
            Some(tier) => tier.style(),
            None => "bg-slate-100 text-slate-700 border border-slate-200",
        }
    }
}

/// Band for a raw JSON score (number or numeric string).
pub fn score_band(raw: &Value) -> ScoreBand {
    coerce_score(raw).map_or(ScoreBand::Unknown, ScoreBand::for_score)
}
