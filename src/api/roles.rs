//! Role creation, listing and assignment endpoints.
//!
//! Handlers only map HTTP/JSON; every rule lives in [`RoleService`].
//!
//! [`RoleService`]: crate::services::RoleService

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;

use super::extract::{ApiJson, ApiPath};
use super::validation::required;
use super::{
    ApiError, AppState, AssignRoleRequest, CreateRoleRequest, RoleListResponse, UserRolesResponse,
};
use crate::models::{RoleSummary, UserWithRoles};

/// `POST /roles`
pub async fn create_role(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleSummary>), ApiError> {
    const MISSING: &str = "role_name and department_name are required";
    let role_name = required(payload.role_name.as_deref(), MISSING)?;
    let department_name = required(payload.department_name.as_deref(), MISSING)?;

    let role = state
        .role_service()
        .create_role(role_name, department_name)
        .await?;

    Ok((StatusCode::CREATED, Json(role)))
}

/// `GET /roles`
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoleListResponse>, ApiError> {
    let roles = state.role_service().list_roles().await?;
    Ok(Json(RoleListResponse {
        total_roles: roles.len(),
        roles,
    }))
}

/// `POST /users/{id}/roles`
pub async fn assign_role(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<AssignRoleRequest>,
) -> Result<Json<UserWithRoles>, ApiError> {
    let role_id = payload
        .role_id
        .ok_or_else(|| ApiError::validation("role_id is required"))?;

    let result = state
        .role_service()
        .assign_role_to_user(user_id, role_id)
        .await?;

    Ok(Json(result))
}

/// `GET /users/{id}/roles`
pub async fn get_user_roles(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<UserRolesResponse>, ApiError> {
    let roles = state.role_service().get_roles_for_user(user_id).await?;
    Ok(Json(UserRolesResponse { user_id, roles }))
}

/// `DELETE /users/{id}/roles/{role_id}`
pub async fn remove_role(
    State(state): State<Arc<AppState>>,
    ApiPath((user_id, role_id)): ApiPath<(i32, i32)>,
) -> Result<Json<UserWithRoles>, ApiError> {
    let result = state
        .role_service()
        .remove_role_from_user(user_id, role_id)
        .await?;

    Ok(Json(result))
}
