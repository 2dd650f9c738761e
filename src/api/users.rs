//! Registration, login, activity toggle and the user report.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::extract::{ApiJson, ApiPath};
use super::validation::required;
use super::{
    ApiError, AppState, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ReportQuery,
};
use crate::models::{ReportStatus, UserActiveStatus, UserReport};

/// `POST /register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    const MISSING: &str = "username, email and password are required";
    let username = required(payload.username.as_deref(), MISSING)?;
    let email = required(payload.email.as_deref(), MISSING)?;
    let password = required(payload.password.as_deref(), MISSING)?;

    let user = state
        .user_service()
        .create_user(username, email, password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            username: user.username,
        }),
    ))
}

/// `POST /login`
///
/// Wrong credentials answer 401 whether or not the account is active; only
/// a correct password on an inactive account answers 403.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    const MISSING: &str = "email and password are required";
    let email = required(payload.email.as_deref(), MISSING)?;
    let password = required(payload.password.as_deref(), MISSING)?;

    let user = state.user_service().authenticate(email, password).await?;

    tracing::Span::current().record("user_id", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        email: user.email,
    }))
}

/// `PATCH /users/{id}/toggle-active`
pub async fn toggle_active(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<UserActiveStatus>, ApiError> {
    let status = state.user_service().toggle_active(user_id).await?;
    Ok(Json(status))
}

/// `GET /users/report?status=all|active|inactive`
pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<UserReport>, ApiError> {
    let report = match query.status.as_deref() {
        Some(status) => state.user_service().get_user_report_for(status).await?,
        None => {
            state
                .user_service()
                .get_user_report(ReportStatus::All)
                .await?
        }
    };

    Ok(Json(report))
}
