//! Within-tier percentile grades.
//!
//! A tier's members are ranked by score (descending, stable on ties) and
//! graded by their relative position only. A `D` in `Best Match` can
//! outscore an `A+` in `Good Match`.

use pathrank_common::{Grade, GradedEntity, MatchTier, ScoredEntity};

/// Sort descending by score; equal scores keep their input order.
pub fn sort_by_score_desc(members: &mut [ScoredEntity]) {
    members.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Grade every member of one tier. Output is in rank order.
pub fn grade_tier(tier: MatchTier, mut members: Vec<ScoredEntity>) -> Vec<GradedEntity> {
    sort_by_score_desc(&mut members);
    let n = members.len();
    members
        .into_iter()
        .enumerate()
        .map(|(i, e)| GradedEntity::new(e, tier, Grade::for_position(i + 1, n)))
        .collect()
}

/// Re-grade already bucketed entities within their current tiers, e.g.
/// after a caller drops some of them. Output is grouped by tier.
pub fn regrade(entities: Vec<GradedEntity>) -> Vec<GradedEntity> {
    let mut by_tier: [Vec<ScoredEntity>; 4] = Default::default();
    for e in entities {
        by_tier[e.bucket as usize].push(e.entity);
    }
    MatchTier::ALL
        .into_iter()
        .zip(by_tier)
        .flat_map(|(tier, members)| grade_tier(tier, members))
        .collect()
}
