use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to load {resource}: {details}")]
    Transport {
        resource: &'static str,
        details: String,
    },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
