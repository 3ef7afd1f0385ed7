use thiserror::Error;

use crate::identity::IdentityError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Provisioning failed: {0}")]
    Provisioning(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

impl From<IdentityError> for RepositoryError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmptyId => Self::InvalidData(err.to_string()),
            IdentityError::Entropy(_) => Self::Provisioning(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Identity",
            id: "abc123".to_string(),
        };
        assert_eq!(error.to_string(), "Identity not found: abc123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Identity",
            id: "abc123".to_string(),
        };
        assert_eq!(error.to_string(), "Identity already exists: abc123");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("unable to open database file".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: unable to open database file"
        );
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("identity id must not be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: identity id must not be empty"
        );
    }

    #[test]
    fn test_empty_identity_id_maps_to_invalid_data() {
        let error = RepositoryError::from(IdentityError::EmptyId);
        assert_eq!(
            error,
            RepositoryError::InvalidData("identity id must not be empty".to_string())
        );
    }

    #[test]
    fn test_repository_error_provisioning_display() {
        let error = RepositoryError::Provisioning("entropy source unavailable".to_string());
        assert_eq!(
            error.to_string(),
            "Provisioning failed: entropy source unavailable"
        );
    }
}
