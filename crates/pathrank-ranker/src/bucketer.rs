//! Match-tier bucketing of ranking API results.
//!
//! Records whose score cannot be coerced to a finite number are dropped.
//! With fewer than two valid records everything lands in `Best Match` at
//! `A+`. Otherwise scores are split into tiers by the configured strategy
//! (deterministic k-means by default) and each tier is graded on its own.

use pathrank_common::{
    BucketingConfig, BucketingStrategy, Grade, GradedEntity, MatchTier, RankerConfig, ScoredEntity,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::grades::grade_tier;
use crate::kmeans::{kmeans_1d, ClusterError, Clustering};

/// Rank cut-offs for country lists: top 3, next 6, next 8, rest.
const COUNTRY_CUTOFFS: [usize; 3] = [3, 9, 17];

/// Rank cut-offs for university lists longer than 100 entries.
const UNIVERSITY_FIXED_CUTOFFS: [usize; 3] = [10, 30, 60];

/// Cumulative percentage shares for university lists of up to 100 entries.
const UNIVERSITY_SHARES: [usize; 3] = [10, 20, 30];

const UNIVERSITY_SHARE_LIMIT: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct ScoreBucketer {
    config: BucketingConfig,
}

impl ScoreBucketer {
    pub fn new(config: BucketingConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &RankerConfig) -> Self {
        Self::new(config.bucketing.clone())
    }

    pub fn config(&self) -> &BucketingConfig {
        &self.config
    }

    /// Bucket a raw API payload. Anything other than an array yields an
    /// empty list.
    pub fn bucket(&self, payload: &Value) -> Vec<GradedEntity> {
        match payload.as_array() {
            Some(records) => self.bucket_records(records),
            None => {
                debug!("ranking payload is not an array, nothing to bucket");
                Vec::new()
            }
        }
    }

    pub fn bucket_records(&self, records: &[Value]) -> Vec<GradedEntity> {
        let entities: Vec<ScoredEntity> = records.iter().filter_map(ScoredEntity::from_record).collect();
        let dropped = records.len() - entities.len();
        if dropped > 0 {
            debug!("dropped {} of {} records without a numeric score", dropped, records.len());
        }
        self.bucket_entities(entities)
    }

    /// Assign tiers and grades. Output is ordered by tier, then by rank
    /// within the tier.
    pub fn bucket_entities(&self, entities: Vec<ScoredEntity>) -> Vec<GradedEntity> {
        if entities.len() < 2 {
            return entities
                .into_iter()
                .map(|e| GradedEntity::new(e, MatchTier::Best, Grade::APlus))
                .collect();
        }

        let scores: Vec<f64> = entities.iter().map(|e| e.score).collect();
        let tiers = self.assign_tiers(&scores);

        let mut by_tier: [Vec<ScoredEntity>; 4] = Default::default();
        for (entity, tier) in entities.into_iter().zip(tiers) {
            by_tier[tier as usize].push(entity);
        }

        MatchTier::ALL
            .into_iter()
            .zip(by_tier)
            .flat_map(|(tier, members)| grade_tier(tier, members))
            .collect()
    }

    /// Tier for each score, in input order.
    pub fn assign_tiers(&self, scores: &[f64]) -> Vec<MatchTier> {
        match self.config.strategy {
            BucketingStrategy::Kmeans => self.kmeans_tiers(scores),
            BucketingStrategy::CountryCutoffs => self.ranked_tiers(scores, |_| COUNTRY_CUTOFFS),
            BucketingStrategy::UniversityShare => self.ranked_tiers(scores, university_cutoffs),
        }
    }

    /// Usable tier count. An unset (zero) `max_tiers` means all four.
    fn tier_limit(&self) -> usize {
        match self.config.max_tiers {
            0 => MatchTier::ALL.len(),
            m => m.min(MatchTier::ALL.len()),
        }
    }

    fn cap(&self, rank: usize) -> MatchTier {
        MatchTier::from_rank(rank.min(self.tier_limit() - 1))
    }

    /// Entity i gets tier min(i, limit - 1), in input order.
    fn positional_tiers(&self, n: usize) -> Vec<MatchTier> {
        (0..n).map(|i| self.cap(i)).collect()
    }

    fn kmeans_tiers(&self, scores: &[f64]) -> Vec<MatchTier> {
        let k = self.tier_limit().min(scores.len());
        let result = kmeans_1d(scores, k, self.config.max_iterations, self.config.tolerance);
        self.tiers_from_clustering(result, scores.len())
    }

    fn tiers_from_clustering(&self, result: Result<Clustering, ClusterError>, n: usize) -> Vec<MatchTier> {
        let clustering = match result {
            Ok(c) if c.assignments.len() == n => c,
            Ok(c) => {
                warn!(
                    "k-means returned {} assignments for {} scores, assigning tiers by input position",
                    c.assignments.len(),
                    n
                );
                return self.positional_tiers(n);
            }
            Err(e) => {
                warn!("k-means failed ({}), assigning tiers by input position", e);
                return self.positional_tiers(n);
            }
        };
        debug!(
            "k-means: k={} iterations={} converged={} centroids={:?}",
            clustering.k(),
            clustering.iterations,
            clustering.converged,
            clustering.centroids
        );

        // Rank non-empty clusters by centroid, highest first.
        let sizes = clustering.sizes();
        let mut order: Vec<usize> = (0..clustering.k()).filter(|&c| sizes[c] > 0).collect();
        order.sort_by(|&a, &b| clustering.centroids[b].total_cmp(&clustering.centroids[a]));

        let mut rank_of = vec![0; clustering.k()];
        for (rank, &cluster) in order.iter().enumerate() {
            rank_of[cluster] = rank;
        }

        clustering
            .assignments
            .iter()
            .map(|&c| self.cap(rank_of[c]))
            .collect()
    }

    /// Tiers from rank cut-offs over the score-descending order.
    fn ranked_tiers(&self, scores: &[f64], cutoffs: impl Fn(usize) -> [usize; 3]) -> Vec<MatchTier> {
        let n = scores.len();
        let cutoffs = cutoffs(n);

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let mut tiers = vec![MatchTier::Weak; n];
        for (rank, &idx) in order.iter().enumerate() {
            let band = cutoffs.iter().position(|&c| rank < c).unwrap_or(cutoffs.len());
            tiers[idx] = self.cap(band);
        }
        tiers
    }
}

/// Cumulative rank cut-offs for a university list of `n` entries.
fn university_cutoffs(n: usize) -> [usize; 3] {
    if n > UNIVERSITY_SHARE_LIMIT {
        return UNIVERSITY_FIXED_CUTOFFS;
    }
    let mut cumulative = 0;
    UNIVERSITY_SHARES.map(|share| {
        cumulative += (n * share).div_ceil(100);
        cumulative
    })
}

/// Bucket a raw payload with the default configuration.
pub fn bucket_scores(payload: &Value) -> Vec<GradedEntity> {
    ScoreBucketer::default().bucket(payload)
}
