//! pathrank-ranker: Weight normalisation, match-tier bucketing and
//! within-tier grading for country and university rankings.
//!
//! Everything here is pure and synchronous: the caller owns all state and
//! performs the network I/O.

pub mod weights;
pub mod normalise;
pub mod slider;
pub mod kmeans;
pub mod bucketer;
pub mod grades;
pub mod bands;
pub mod query;
pub mod view;

pub use bucketer::{bucket_scores, ScoreBucketer};
pub use normalise::{normalise_ratings, RatingPanel};
pub use query::{RankingCategory, RankingQuery};
pub use slider::{BoundaryShift, CutPointSlider, HoldTiming, SteppedSlider};
pub use weights::{NoopListener, NormalizedWeights, WeightListener};
