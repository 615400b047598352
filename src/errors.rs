/// Domain-specific error types for the prediction engine.
/// Numeric domain edges (quantile at 0/1, expired Greeks) are not errors:
/// those return sentinels. Only these conditions fail a run:
/// - Invalid programmatic configuration
/// - Sample buffers that cannot be allocated
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to allocate sample buffer of {len} prices")]
    Allocation { len: usize },

    #[error("model computation error: {0}")]
    Model(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PredictorError {
    fn from(e: serde_json::Error) -> Self {
        PredictorError::Serialization(e.to_string())
    }
}

pub type PredictorResult<T> = Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_message_names_size() {
        let err = PredictorError::Allocation { len: 1_000_000 };
        assert!(err.to_string().contains("1000000"), "message should carry the size: {err}");
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: PredictorError = parse.into();
        assert!(matches!(err, PredictorError::Serialization(_)));
    }
}
