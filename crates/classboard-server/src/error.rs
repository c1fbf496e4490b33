//! Server bootstrap errors
//!
//! Request-level failures are mapped per feature in `routes.rs`; this type
//! covers wiring the server together.

use thiserror::Error;

use crate::{db::DbError, provider::ProviderError};

pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Playlist provider setup failed: {0}")]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_provider() -> ServerResult<()> {
        Err(ProviderError::UnknownPlaylist("PLgone".to_string()))?;
        Ok(())
    }

    #[test]
    fn test_provider_setup_failure_converts() {
        let err = wire_provider().unwrap_err();
        assert!(matches!(err, ServerError::Provider(ProviderError::UnknownPlaylist(_))));
        assert!(err.to_string().starts_with("Playlist provider setup failed"));
    }
}
