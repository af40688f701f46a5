use thiserror::Error;

/// Errors from repository operations (used by trait definitions in shopbot-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors related to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found")]
    NotFound,

    #[error("invalid product: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for CatalogError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => CatalogError::NotFound,
            other => CatalogError::Storage(other.to_string()),
        }
    }
}

/// Errors related to cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("product not found")]
    ProductNotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for CartError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => CartError::ProductNotFound,
            other => CartError::Storage(other.to_string()),
        }
    }
}

/// Errors related to conversation operations.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("conversation not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ConversationError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ConversationError::NotFound,
            other => ConversationError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_catalog_error_from_repository() {
        let err: CatalogError = RepositoryError::NotFound.into();
        assert!(matches!(err, CatalogError::NotFound));

        let err: CatalogError = RepositoryError::Query("boom".to_string()).into();
        assert!(matches!(err, CatalogError::Storage(_)));
    }

    #[test]
    fn test_conversation_error_display() {
        assert_eq!(
            ConversationError::NotFound.to_string(),
            "conversation not found"
        );
    }
}
