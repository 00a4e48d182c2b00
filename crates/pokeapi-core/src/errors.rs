//! Application error type with HTTP response conversion.
//!
//! Every failure leaving a handler or middleware is an [`AppError`]. It renders
//! as the standard response envelope (see [`crate::response::ApiResponse`]) with
//! `success: false`, the HTTP status as `code` and the error text as `message`.
//!
//! # Example
//!
//! ```ignore
//! use pokeapi_core::AppError;
//!
//! let err = AppError::not_found(anyhow::anyhow!("Pokemon not found"));
//! let err = AppError::forbidden("Forbidden: Insufficient permissions")
//!     .with_data(serde_json::json!({ "requiredRole": "admin", "userRole": "user" }));
//! ```

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::response::ApiResponse;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Optional diagnostic payload placed in the envelope's `data` field.
    pub data: Option<Value>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            data: None,
        }
    }

    /// Attaches a diagnostic payload to the error response.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = ApiResponse {
            success: false,
            code: self.status.as_u16(),
            message: self.error.to_string(),
            data: self.data,
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unauthorized_renders_envelope() {
        let (status, body) = body_json(AppError::unauthorized("Invalid token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 401);
        assert_eq!(body["message"], "Invalid token");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_forbidden_carries_data() {
        let err = AppError::forbidden("Forbidden: Insufficient permissions")
            .with_data(json!({ "requiredRole": "admin", "userRole": "user" }));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 403);
        assert_eq!(body["data"]["requiredRole"], "admin");
        assert_eq!(body["data"]["userRole"], "user");
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.data.is_none());
    }

    #[test]
    fn test_conflict_status() {
        let err = AppError::conflict(anyhow::anyhow!("User email already used"));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "409 Conflict: User email already used");
    }
}
