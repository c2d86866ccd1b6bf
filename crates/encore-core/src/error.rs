//! Error types module
//!
//! All server-side errors are unified under the `AppError` enum. The
//! `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature; with `default-features = false` the enum has no database variant
//! and client crates carry their own error context instead.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<crate::validation::ValidationError> for AppError {
    fn from(err: crate::validation::ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl AppError {
    /// Underlying database error detail, when present. Used by the API layer
    /// to fill the `details` field of a persistence-failure response.
    pub fn database_detail(&self) -> Option<String> {
        match self {
            #[cfg(feature = "sqlx")]
            AppError::Database(e) => Some(e.to_string()),
            #[cfg(not(feature = "sqlx"))]
            AppError::Database(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_to_invalid_input() {
        let err: AppError = crate::validation::ValidationError::UnsupportedType {
            content_type: "application/pdf".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.to_string().contains("application/pdf"));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn database_detail_exposes_source() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(err.database_detail().is_some());
        assert!(AppError::NotFound("x".into()).database_detail().is_none());
    }
}
