use thiserror::Error;

#[derive(Error, Debug)]
pub enum RacelineError {
    #[error("Course format error: {0}")]
    CourseFormat(String),

    #[error("Degenerate intersection: lines are parallel")]
    DegenerateIntersection,

    #[error("Policy index out of range: cluster {cluster} for genotype of length {len}")]
    PolicyIndexOutOfRange { cluster: usize, len: usize },

    #[error("Classifier artifact error: {0}")]
    Artifact(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Telemetry encode error: {0}")]
    TelemetryEncode(#[from] rmp_serde::encode::Error),
}

pub type Result<T> = std::result::Result<T, RacelineError>;
