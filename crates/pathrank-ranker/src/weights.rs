//! Normalized weight mapping handed to the ranking API.
//! Keys are metric-group ids; values are fractions of the whole.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate rounding slack accepted for rating-mode weights.
pub const RATING_SUM_TOLERANCE: f64 = 0.02;

/// Group id → fraction in [0, 1].
/// Ordered by group id so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedWeights(BTreeMap<String, f64>);

impl NormalizedWeights {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Every group at zero: the explicit "nothing rated yet" state.
    pub fn zeroed<S: AsRef<str>>(groups: &[S]) -> Self {
        groups.iter().map(|g| (g.as_ref().to_string(), 0.0)).collect()
    }

    pub fn insert(&mut self, group: impl Into<String>, weight: f64) {
        self.0.insert(group.into(), weight);
    }

    pub fn get(&self, group: &str) -> Option<f64> {
        self.0.get(group).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// True once at least one group carries weight. Ranking may only
    /// proceed in that state.
    pub fn is_adjusted(&self) -> bool {
        self.0.values().any(|&w| w > 0.0)
    }

    /// Validate that all weights sum to 1.0 within `tolerance`.
    pub fn validate(&self, tolerance: f64) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }
}

impl FromIterator<(String, f64)> for NormalizedWeights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Receives the full mapping after every weight change.
pub trait WeightListener {
    fn on_weights_changed(&mut self, weights: &NormalizedWeights);
}

impl<F> WeightListener for F
where
    F: FnMut(&NormalizedWeights),
{
    fn on_weights_changed(&mut self, weights: &NormalizedWeights) {
        self(weights)
    }
}

/// Listener for callers that only want the returned mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl WeightListener for NoopListener {
    fn on_weights_changed(&mut self, _weights: &NormalizedWeights) {}
}

/// Group fractions from per-group percentages, in `groups` order.
pub(crate) fn from_percentages<S: AsRef<str>>(groups: &[S], percentages: &[f64]) -> NormalizedWeights {
    groups
        .iter()
        .zip(percentages)
        .map(|(g, p)| (g.as_ref().to_string(), p / 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_is_not_adjusted() {
        let w = NormalizedWeights::zeroed(&["1", "2", "3"]);
        assert_eq!(w.len(), 3);
        assert!(!w.is_adjusted());
        assert_eq!(w.sum(), 0.0);
    }

    #[test]
    fn test_validate_tolerance() {
        let w: NormalizedWeights = [("a".to_string(), 0.33), ("b".to_string(), 0.33), ("c".to_string(), 0.33)]
            .into_iter()
            .collect();
        assert!(!w.validate(1e-6));
        assert!(w.validate(RATING_SUM_TOLERANCE));
        assert!(w.is_adjusted());
    }

    #[test]
    fn test_closure_listener_receives_mapping() {
        let mut seen = Vec::new();
        let mut listener = |w: &NormalizedWeights| seen.push(w.sum());
        let w = from_percentages(&["a", "b"], &[25.0, 75.0]);
        listener.on_weights_changed(&w);
        assert_eq!(seen, vec![1.0]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let w = from_percentages(&["2", "1"], &[40.0, 60.0]);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"1":0.6,"2":0.4}"#);
    }
}
