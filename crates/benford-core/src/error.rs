use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenfordError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("No valid samples: all {dropped} values were zero, NaN, infinite or unparseable")]
    NoValidSamples { dropped: usize },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl BenfordError {
    pub(crate) fn invalid_base(base: u32) -> Self {
        BenfordError::InvalidInput {
            field: "base".into(),
            reason: format!("Must be at least 3, got {base}"),
        }
    }
}
