//! Authenticated author extraction
//!
//! Session handling lives in front of this server. The authenticating proxy
//! forwards the signed-in user as a UUID in the `x-user-id` header.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::response::ErrorResponse;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The signed-in user, required by handlers that act on behalf of an author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required: missing x-user-id header")]
    Missing,
    #[error("Authentication required: x-user-id is not a valid user id")]
    Invalid,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("UNAUTHORIZED", self.to_string());
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(AuthError::Missing)?
            .to_str()
            .map_err(|_| AuthError::Invalid)?;

        Uuid::parse_str(raw.trim())
            .map(AuthUser)
            .map_err(|_| AuthError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<AuthUser, AuthError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_valid_uuid() {
        let id = Uuid::new_v4();
        let user = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(user.id(), id);
    }

    #[tokio::test]
    async fn test_missing_header() {
        assert_eq!(extract(None).await.unwrap_err(), AuthError::Missing);
    }

    #[tokio::test]
    async fn test_malformed_header() {
        assert_eq!(extract(Some("alice")).await.unwrap_err(), AuthError::Invalid);
    }
}
