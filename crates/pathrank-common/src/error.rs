use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathrankError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Slider boundary {index} out of range ({boundaries} boundaries)")]
    BoundaryOutOfRange { index: usize, boundaries: usize },

    #[error("Unknown metric group: {0}")]
    UnknownGroup(String),

    #[error("Weights not adjusted: every group weight is zero")]
    WeightsNotAdjusted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PathrankError>;
