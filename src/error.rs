use std::fmt;

/// The main error type for planboard operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanboardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Mailer error: {0}")]
    Mailer(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl PlanboardError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    pub fn mailer(msg: impl fmt::Display) -> Self {
        Self::Mailer(msg.to_string())
    }
}

/// Convenience result type for planboard operations.
pub type Result<T> = std::result::Result<T, PlanboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanboardError::bad_request("unknown interval");
        assert_eq!(err.to_string(), "Bad request: unknown interval");

        let err = PlanboardError::invalid_catalog("duplicate volume");
        assert_eq!(err.to_string(), "Invalid catalog: duplicate volume");
    }

    #[test]
    fn test_anyhow_passthrough() {
        let err: PlanboardError = anyhow::anyhow!("collaborator failed").into();
        assert_eq!(err.to_string(), "collaborator failed");
    }
}
