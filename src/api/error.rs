use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::{ErrorBody, MessageResponse};
use crate::services::{RoleError, UserError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    Conflict(String),

    InternalError(String),

    Unauthorized(String),

    Forbidden(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            // Login failures answer with `message`, like its success body.
            ApiError::Unauthorized(msg) => {
                return (StatusCode::UNAUTHORIZED, Json(MessageResponse::new(msg))).into_response();
            }
            ApiError::Forbidden(msg) => {
                return (StatusCode::FORBIDDEN, Json(MessageResponse::new(msg))).into_response();
            }
        };

        (status, Json(ErrorBody::new(error_message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::NotFound(err.to_string()),
            UserError::Validation(msg) => Self::validation(msg),
            UserError::Conflict(msg) => Self::Conflict(msg),
            UserError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            UserError::AccountInactive => Self::Forbidden(err.to_string()),
            UserError::InvalidStatus(_) => Self::validation(err.to_string()),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl From<RoleError> for ApiError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::UserNotFound(_)
            | RoleError::RoleNotFound(_)
            | RoleError::NotAssigned { .. } => Self::NotFound(err.to_string()),
            RoleError::Validation(msg) => Self::validation(msg),
            RoleError::Conflict => Self::Conflict(err.to_string()),
            RoleError::Database(msg) => Self::DatabaseError(msg),
            RoleError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_status_codes() {
        let cases = [
            (UserError::NotFound(1), StatusCode::NOT_FOUND),
            (UserError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (UserError::Conflict("x".into()), StatusCode::CONFLICT),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::AccountInactive, StatusCode::FORBIDDEN),
            (UserError::InvalidStatus("x".into()), StatusCode::BAD_REQUEST),
            (UserError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (UserError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_role_error_status_codes() {
        let not_assigned = RoleError::NotAssigned {
            username: "u".into(),
            role_name: "r".into(),
            department_name: "d".into(),
        };
        let cases = [
            (RoleError::UserNotFound(1), StatusCode::NOT_FOUND),
            (RoleError::RoleNotFound(1), StatusCode::NOT_FOUND),
            (not_assigned, StatusCode::NOT_FOUND),
            (RoleError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (RoleError::Conflict, StatusCode::CONFLICT),
            (RoleError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
