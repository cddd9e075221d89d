use thiserror::Error;

/// Errors surfaced by the ambient parts of the app (config, catalogue, terminal).
///
/// Question generation and session transitions have no failure modes; these
/// only cover I/O and data loading around them.
#[derive(Debug, Error)]
pub enum MathFunError {
    #[error("I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("embedded file not found: {0}")]
    MissingAsset(String),

    #[error("grade must be between 1 and 4, got {0}")]
    InvalidGrade(u8),
}

pub type Result<T> = std::result::Result<T, MathFunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MathFunError::InvalidGrade(7).to_string(),
            "grade must be between 1 and 4, got 7"
        );
        assert_eq!(
            MathFunError::MissingAsset("topics.json".into()).to_string(),
            "embedded file not found: topics.json"
        );
    }
}
