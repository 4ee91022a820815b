//! Rating-to-weight normalisation.
//!
//! Each metric group is rated 0–5 for importance. A group's weight is its
//! share of the rating total, rounded to two decimals per group. Rounding
//! error is not redistributed, so the weights may sum to anywhere in
//! 0.98–1.02. An all-zero rating set produces all-zero weights.

use std::collections::HashMap;

use pathrank_common::{PathrankError, Result};
use tracing::debug;

use crate::weights::{NormalizedWeights, WeightListener};

/// Highest importance rating a group can receive.
pub const MAX_RATING: u8 = 5;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Normalise importance ratings into weights for `groups`.
///
/// Groups absent from `ratings` count as 0; entries for unlisted groups are
/// ignored; ratings above [`MAX_RATING`] are capped.
pub fn normalise_ratings<S: AsRef<str>>(groups: &[S], ratings: &HashMap<String, u8>) -> NormalizedWeights {
    let values: Vec<u32> = groups
        .iter()
        .map(|g| u32::from(ratings.get(g.as_ref()).copied().unwrap_or(0).min(MAX_RATING)))
        .collect();
    let total: u32 = values.iter().sum();

    if total == 0 {
        return NormalizedWeights::zeroed(groups);
    }

    groups
        .iter()
        .zip(values)
        .map(|(g, r)| (g.as_ref().to_string(), round_to(f64::from(r) / f64::from(total), 2)))
        .collect()
}

/// Importance ratings for one category of metric groups.
///
/// Every listed group starts at 0. Each change recomputes the weights and
/// hands the full mapping to the caller's listener.
#[derive(Debug, Clone)]
pub struct RatingPanel {
    groups: Vec<String>,
    ratings: HashMap<String, u8>,
}

impl RatingPanel {
    pub fn new<S: AsRef<str>>(groups: &[S]) -> Self {
        let groups: Vec<String> = groups.iter().map(|g| g.as_ref().to_string()).collect();
        let ratings = groups.iter().map(|g| (g.clone(), 0)).collect();
        Self { groups, ratings }
    }

    /// Start from previously held ratings. Missing groups are seeded at 0.
    pub fn with_ratings<S: AsRef<str>>(groups: &[S], ratings: &HashMap<String, u8>) -> Self {
        let mut panel = Self::new(groups);
        for g in &panel.groups {
            if let Some(&r) = ratings.get(g) {
                panel.ratings.insert(g.clone(), r.min(MAX_RATING));
            }
        }
        panel
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn rating(&self, group: &str) -> Option<u8> {
        self.ratings.get(group).copied()
    }

    pub fn ratings(&self) -> &HashMap<String, u8> {
        &self.ratings
    }

    pub fn weights(&self) -> NormalizedWeights {
        normalise_ratings(&self.groups, &self.ratings)
    }

    /// Set one group's rating (capped at 5) and notify `listener`.
    pub fn set_rating(
        &mut self,
        group: &str,
        rating: u8,
        listener: &mut impl WeightListener,
    ) -> Result<NormalizedWeights> {
        let slot = self
            .ratings
            .get_mut(group)
            .ok_or_else(|| PathrankError::UnknownGroup(group.to_string()))?;
        let rating = rating.min(MAX_RATING);
        *slot = rating;

        let weights = self.weights();
        debug!("rating {} -> {}, weights sum {:.2}", group, rating, weights.sum());
        listener.on_weights_changed(&weights);
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{NoopListener, RATING_SUM_TOLERANCE};

    fn ratings(pairs: &[(&str, u8)]) -> HashMap<String, u8> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_equal_pair_splits_evenly() {
        let w = normalise_ratings(&["A", "B", "C"], &ratings(&[("A", 5), ("B", 5), ("C", 0)]));
        assert_eq!(w.get("A"), Some(0.5));
        assert_eq!(w.get("B"), Some(0.5));
        assert_eq!(w.get("C"), Some(0.0));
    }

    #[test]
    fn test_all_zero_is_all_zero() {
        let w = normalise_ratings(&["A", "B"], &ratings(&[("A", 0)]));
        assert_eq!(w.get("A"), Some(0.0));
        assert_eq!(w.get("B"), Some(0.0));
        assert!(!w.is_adjusted());
    }

    #[test]
    fn test_thirds_round_without_redistribution() {
        let w = normalise_ratings(&["A", "B", "C"], &ratings(&[("A", 1), ("B", 1), ("C", 1)]));
        assert_eq!(w.get("A"), Some(0.33));
        assert!((w.sum() - 0.99).abs() < 1e-9);
        assert!(w.validate(RATING_SUM_TOLERANCE));
    }

    #[test]
    fn test_missing_and_unlisted_groups() {
        let w = normalise_ratings(&["A", "B"], &ratings(&[("A", 4), ("Z", 5)]));
        assert_eq!(w.len(), 2);
        assert_eq!(w.get("A"), Some(1.0));
        assert_eq!(w.get("B"), Some(0.0));
        assert_eq!(w.get("Z"), None);
    }

    #[test]
    fn test_ratings_above_five_are_capped() {
        let w = normalise_ratings(&["A", "B"], &ratings(&[("A", 9), ("B", 5)]));
        assert_eq!(w.get("A"), Some(0.5));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_panel_notifies_on_every_change() {
        let mut panel = RatingPanel::new(&["1", "2"]);
        let mut seen: Vec<NormalizedWeights> = Vec::new();
        let mut listener = |w: &NormalizedWeights| seen.push(w.clone());

        panel.set_rating("1", 3, &mut listener).unwrap();
        panel.set_rating("2", 1, &mut listener).unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].get("1"), Some(1.0));
        assert_eq!(seen[1].get("1"), Some(0.75));
        assert_eq!(seen[1].get("2"), Some(0.25));
    }

    #[test]
    fn test_panel_rejects_unknown_group() {
        let mut panel = RatingPanel::new(&["1"]);
        let err = panel.set_rating("9", 3, &mut NoopListener).unwrap_err();
        assert!(matches!(err, PathrankError::UnknownGroup(g) if g == "9"));
        assert_eq!(panel.rating("1"), Some(0));
    }

    #[test]
    fn test_panel_with_ratings_seeds_missing() {
        let panel = RatingPanel::with_ratings(&["1", "2"], &ratings(&[("2", 4)]));
        assert_eq!(panel.rating("1"), Some(0));
        assert_eq!(panel.rating("2"), Some(4));
        assert_eq!(panel.weights().get("2"), Some(1.0));
    }
}
