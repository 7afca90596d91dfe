use {crate::domain::BucketWidth, thiserror::Error};

/// Boxed error produced by an arbitrary scorer.
pub type ScoringSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum AlivePathError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("bucket width {requested} does not match the {model} unit the model was fitted in")]
    UnitMismatch {
        model: BucketWidth,
        requested: BucketWidth,
    },

    #[error("scoring bucket T={t} failed")]
    Scoring {
        t: usize,
        #[source]
        source: ScoringSource,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("model has not been fitted")]
    NotFitted,

    #[error("invalid model input: {0}")]
    InvalidInput(String),

    #[error("optimizer did not converge: {0}")]
    DidNotConverge(String),
}
