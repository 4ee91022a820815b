//! Helpers for rendering bucketed results: grouping by tier and the tier
//! filter from the results panel.

use pathrank_common::{GradedEntity, MatchTier};

/// Group entities by tier in display order. Tiers without members are
/// omitted; member order is preserved.
pub fn group_by_tier(entities: &[GradedEntity]) -> Vec<(MatchTier, Vec<GradedEntity>)> {
    MatchTier::ALL
        .into_iter()
        .filter_map(|tier| {
            let members: Vec<GradedEntity> = entities.iter().filter(|e| e.bucket == tier).cloned().collect();
            (!members.is_empty()).then_some((tier, members))
        })
        .collect()
}

/// Keep entities whose tier is selected. An empty selection keeps all.
pub fn filter_by_tiers(entities: Vec<GradedEntity>, selected: &[MatchTier]) -> Vec<GradedEntity> {
    if selected.is_empty() {
        return entities;
    }
    entities.into_iter().filter(|e| selected.contains(&e.bucket)).collect()
}
