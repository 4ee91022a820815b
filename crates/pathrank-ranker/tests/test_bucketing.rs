//! End-to-end bucketing of ranking payloads.

use pathrank_common::{BucketingConfig, BucketingStrategy, Grade, GradedEntity, MatchTier, RankerConfig};
use pathrank_ranker::view::group_by_tier;
use pathrank_ranker::{bucket_scores, ScoreBucketer};
use pathrank_test_utils::pretty_assertions::assert_eq;
use pathrank_test_utils::{countries, country, init_tracing, seeded_scores, university};
use serde_json::{json, Value};

fn membership(graded: &[GradedEntity]) -> Vec<(String, MatchTier, Grade)> {
    graded
        .iter()
        .map(|g| (g.name().unwrap_or_default().to_string(), g.bucket, g.grade))
        .collect()
}

fn tier_sizes(graded: &[GradedEntity]) -> [usize; 4] {
    MatchTier::ALL.map(|t| graded.iter().filter(|g| g.bucket == t).count())
}

#[test]
fn test_single_valid_entity() {
    let out = bucket_scores(&json!([country("X", 75)]));
    assert_eq!(membership(&out), vec![("X".to_string(), MatchTier::Best, Grade::APlus)]);
}

#[test]
fn test_ten_wide_scores_are_deterministic() {
    init_tracing();
    let payload = countries(&[97.0, 12.5, 55.0, 88.0, 3.0, 71.0, 64.0, 29.0, 41.0, 80.0]);
    let first = bucket_scores(&payload);
    let second = bucket_scores(&payload);
    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].name(), Some("C0"));
    assert_eq!(first[0].bucket, MatchTier::Best);
    assert!(first.iter().any(|g| g.bucket == MatchTier::Weak));
}

#[test]
fn test_rebucketing_output_is_stable() {
    init_tracing();
    for seed in 0..30 {
        let payload = countries(&seeded_scores(seed, 60));
        let once = bucket_scores(&payload);
        let again = bucket_scores(&serde_json::to_value(&once).unwrap());
        assert_eq!(membership(&once), membership(&again), "seed {seed}");
    }
}

#[test]
fn test_tiers_are_ordered_by_score() {
    for seed in 100..130 {
        let out = bucket_scores(&countries(&seeded_scores(seed, 40)));
        for pair in out.windows(2) {
            assert!(pair[0].bucket <= pair[1].bucket);
            if pair[0].bucket == pair[1].bucket {
                assert!(pair[0].score() >= pair[1].score());
            } else {
                // Every member of a better tier outscores every member of a worse one.
                assert!(pair[0].score() > pair[1].score(), "seed {seed}");
            }
        }
    }
}

#[test]
fn test_unparseable_scores_are_absent() {
    let payload = json!([
        country("A", 91),
        country("B", "abc"),
        country("C", Value::Null),
        country("D", "64.5"),
        country("E", 12),
        {"country": "F"},
        "not a record",
    ]);
    let out = bucket_scores(&payload);
    let names: Vec<&str> = out.iter().filter_map(|g| g.name()).collect();
    assert_eq!(names, vec!["A", "D", "E"]);
}

#[test]
fn test_grades_within_one_tier() {
    let payload = countries(&[70.0, 90.0, 50.0, 80.0, 60.0]);
    let bucketer = ScoreBucketer::new(BucketingConfig { max_tiers: 1, ..Default::default() });
    let out = bucketer.bucket(&payload);
    let grades: Vec<&str> = out.iter().map(|g| g.grade.as_str()).collect();
    let scores: Vec<f64> = out.iter().map(|g| g.score()).collect();
    assert_eq!(grades, vec!["A+", "A", "B", "C", "D"]);
    assert_eq!(scores, vec![90.0, 80.0, 70.0, 60.0, 50.0]);
}

#[test]
fn test_grades_are_local_to_each_tier() {
    let out = bucket_scores(&countries(&[99.0, 98.0, 97.0, 96.0, 95.0, 20.0, 19.0, 18.0, 17.0, 16.0, 60.0, 61.0, 40.0, 41.0]));
    let groups = group_by_tier(&out);
    assert_eq!(groups.len(), 4);
    for (tier, members) in &groups {
        for (i, m) in members.iter().enumerate() {
            assert_eq!(m.grade, Grade::for_position(i + 1, members.len()), "{tier} #{i}");
        }
    }

    // The weakest Best member still outscores the strongest Good member.
    let best_last = &groups[0].1[groups[0].1.len() - 1];
    let good_first = &groups[1].1[0];
    assert_eq!(best_last.grade, Grade::D);
    assert_eq!(good_first.grade, Grade::B);
    assert!(best_last.score() > good_first.score());
}

#[test]
fn test_country_cutoff_strategy() {
    let config = RankerConfig {
        bucketing: BucketingConfig { strategy: BucketingStrategy::CountryCutoffs, ..Default::default() },
        ..Default::default()
    };
    let bucketer = ScoreBucketer::from_config(&config);
    let out = bucketer.bucket(&countries(&seeded_scores(7, 20)));
    assert_eq!(tier_sizes(&out), [3, 6, 8, 3]);
}

#[test]
fn test_university_share_strategy() {
    let bucketer = ScoreBucketer::new(BucketingConfig {
        strategy: BucketingStrategy::UniversityShare,
        ..Default::default()
    });

    let small: Vec<Value> = seeded_scores(3, 10)
        .into_iter()
        .enumerate()
        .map(|(i, s)| university(&format!("U{i}"), "NO", s))
        .collect();
    assert_eq!(tier_sizes(&bucketer.bucket(&Value::Array(small))), [1, 2, 3, 4]);

    let large = bucketer.bucket(&countries(&seeded_scores(4, 150)));
    assert_eq!(tier_sizes(&large), [10, 20, 30, 90]);
}

#[test]
fn test_passthrough_and_style_tokens() {
    let payload = json!([
        {"university_name": "Uni A", "country": "NZ", "score": "77.7", "rank_change": -2},
        {"university_name": "Uni B", "country": "AU", "score": 30},
    ]);
    let out = bucket_scores(&payload);
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json[0]["university_name"], json!("Uni A"));
    assert_eq!(json[0]["rank_change"], json!(-2));
    assert_eq!(json[0]["score"], json!(77.7));
    assert_eq!(json[0]["bucket"], json!("Best Match"));
    assert_eq!(json[0]["classes"], json!(MatchTier::Best.style()));
    assert_eq!(json[1]["bucket"], json!("Good Match"));
}
