/// Core entity types for ranked countries and universities.
/// Records arrive as JSON objects from the ranking API; everything except the
/// score passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field carrying the final score on every ranking record.
pub const SCORE_FIELD: &str = "score";

/// Fields a record may use to identify itself, in lookup order.
const NAME_FIELDS: [&str; 3] = ["country", "university_name", "name"];

/// Fields attached by the bucketer. Stripped on ingest so re-bucketing
/// an already-graded list starts from a clean record.
const DERIVED_FIELDS: [&str; 3] = ["bucket", "classes", "grade"];

// ---------------------------------------------------------------------------
// Match tier
// ---------------------------------------------------------------------------

/// Qualitative match tier, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    #[serde(rename = "Best Match")]
    Best,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Fair Match")]
    Fair,
    #[serde(rename = "Weak Match")]
    Weak,
}

impl MatchTier {
    /// All tiers in display order.
    pub const ALL: [MatchTier; 4] = [MatchTier::Best, MatchTier::Good, MatchTier::Fair, MatchTier::Weak];

    /// Tier for a 0-based rank; anything past the last tier lands in `Weak`.
    pub fn from_rank(rank: usize) -> Self {
        Self::ALL[rank.min(Self::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Best => "Best Match",
            MatchTier::Good => "Good Match",
            MatchTier::Fair => "Fair Match",
            MatchTier::Weak => "Weak Match",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Badge style token for this tier. Opaque to the engine.
    pub fn style(&self) -> &'static str {
        match self {
            MatchTier::Best => "bg-emerald-500/15 text-emerald-800 ring-2 ring-emerald-500/20",
            MatchTier::Good => "bg-amber-400/15 text-amber-800 ring-2 ring-amber-400/25",
            MatchTier::Fair => "bg-slate-400/15 text-slate-700 ring-2 ring-slate-400/20",
            MatchTier::Weak => "bg-red-600/10 text-rose-800 ring-2 ring-red-600/15",
        }
    }

    /// Table header style token for this tier.
    pub fn header_style(&self) -> &'static str {
        match self {
            MatchTier::Best => "bg-gradient-to-t from-emerald-500/15 to-emerald-500/10 text-emerald-800",
            MatchTier::Good => "bg-gradient-to-t from-amber-400/15 to-amber-400/10 text-amber-800",
            MatchTier::Fair => "bg-gradient-to-t from-slate-400/15 to-slate-400/10 text-slate-700",
            MatchTier::Weak => "bg-gradient-to-t from-red-600/10 to-red-600/5 text-rose-800",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Percentile-letter grade relative to a tier's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Grade for the member at 1-indexed `position` in a tier of `size`.
    ///
    /// | position / size | Grade |
    /// |-----------------|-------|
    /// | <= 0.20         | A+    |
    /// | <= 0.40         | A     |
    /// | <= 0.60         | B     |
    /// | <= 0.80         | C     |
    /// | >  0.80         | D     |
    ///
    /// Compared as `5 * position <= k * size` so boundaries are exact.
    pub fn for_position(position: usize, size: usize) -> Self {
        let scaled = position * 5;
        match scaled {
            s if s <= size => Grade::APlus,
            s if s <= size * 2 => Grade::A,
            s if s <= size * 3 => Grade::B,
            s if s <= size * 4 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scored entity
// ---------------------------------------------------------------------------

/// Coerce a raw JSON score to a finite number.
///
/// Numbers pass through; strings are trimmed and parsed. Empty strings,
/// `null`, booleans, containers and non-finite values yield `None`.
pub fn coerce_score(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// A ranking record with a coerced numeric score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    pub score: f64,
    /// Every other field of the original record.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScoredEntity {
    pub fn new(score: f64, fields: Map<String, Value>) -> Self {
        Self { score, fields }
    }

    /// Build from a raw API record. Returns `None` for non-objects and for
    /// records whose score cannot be coerced.
    pub fn from_record(record: &Value) -> Option<Self> {
        let obj = record.as_object()?;
        let score = coerce_score(obj.get(SCORE_FIELD)?)?;
        let mut fields = obj.clone();
        fields.remove(SCORE_FIELD);
        for key in DERIVED_FIELDS {
            fields.remove(key);
        }
        Some(Self { score, fields })
    }

    /// Identifying name (`country`, `university_name` or `name`), if present.
    pub fn name(&self) -> Option<&str> {
        NAME_FIELDS
            .iter()
            .find_map(|k| self.fields.get(*k).and_then(Value::as_str))
    }
}

// ---------------------------------------------------------------------------
// Graded entity
// ---------------------------------------------------------------------------

/// A scored entity placed in a tier and graded against its tier-mates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedEntity {
    #[serde(flatten)]
    pub entity: ScoredEntity,
    pub bucket: MatchTier,
    /// Style token of `bucket`, passed through for renderers.
    pub classes: String,
    pub grade: Grade,
}

impl GradedEntity {
    pub fn new(entity: ScoredEntity, bucket: MatchTier, grade: Grade) -> Self {
        Self {
            entity,
            bucket,
            classes: bucket.style().to_string(),
            grade,
        }
    }

    pub fn score(&self) -> f64 {
        self.entity.score
    }

    pub fn name(&self) -> Option<&str> {
        self.entity.name()
    }
}
