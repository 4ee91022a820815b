//! Shared fixtures for pathrank tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

pub use pretty_assertions;

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Country record as returned by the country ranking endpoint.
pub fn country(name: &str, score: impl Into<Value>) -> Value {
    json!({ "country": name, "score": score.into() })
}

/// University record as returned by the university ranking endpoint.
pub fn university(name: &str, country: &str, score: impl Into<Value>) -> Value {
    json!({ "university_name": name, "country": country, "score": score.into() })
}

/// JSON array of country records named `C0`, `C1`, ... with the given scores.
pub fn countries(scores: &[f64]) -> Value {
    Value::Array(
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| country(&format!("C{i}"), s))
            .collect(),
    )
}

/// `n` scores in [0, 100) from a seeded generator, rounded to two decimals
/// the way the API reports them.
pub fn seeded_scores(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(0.0..100.0_f64) * 100.0).round() / 100.0)
        .collect()
}

/// Seeded random ratings in 0..=5 for `groups`.
pub fn seeded_ratings(seed: u64, groups: &[&str]) -> Vec<(String, u8)> {
    let mut rng = StdRng::seed_from_u64(seed);
    groups
        .iter()
        .map(|g| (g.to_string(), rng.gen_range(0..=5)))
        .collect()
}

/// Seeded sequence of `(boundary, up)` slider moves over `boundaries` boundaries.
pub fn seeded_moves(seed: u64, boundaries: usize, n: usize) -> Vec<(usize, bool)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(0..boundaries), rng.gen_bool(0.5)))
        .collect()
}
