//! pathrank-common: Shared types, errors, and configuration used across all pathrank crates.

pub mod error;
pub mod entities;
pub mod ranker_config;

// Re-export commonly used types
pub use entities::{GradedEntity, Grade, MatchTier, ScoredEntity};
pub use error::{PathrankError, Result};
pub use ranker_config::{ApiConfig, BucketingConfig, BucketingStrategy, RankerConfig, SliderConfig};
