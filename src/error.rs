use thiserror::Error;

/// Failures of the business-object layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client-supplied data broke a business rule.
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Passed through from the data-access layer unchanged.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
