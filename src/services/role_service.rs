//! Domain service for roles and their assignment to users.

use thiserror::Error;

use crate::models::{RoleSummary, UserWithRoles};

/// Errors specific to role operations.
#[derive(Debug, Error)]
pub enum RoleError {
    #[error("User with id {0} not found")]
    UserNotFound(i32),

    #[error("Role with id {0} not found")]
    RoleNotFound(i32),

    /// The user exists but does not hold the role.
    #[error("User {username} does not have role '{role_name}' in department '{department_name}'")]
    NotAssigned {
        username: String,
        role_name: String,
        department_name: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Role with this name and department already exists")]
    Conflict,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for RoleError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RoleError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for roles.
#[async_trait::async_trait]
pub trait RoleService: Send + Sync {
    /// Creates a role scoped to a department.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::Conflict`] when the pair already exists.
    async fn create_role(
        &self,
        role_name: &str,
        department_name: &str,
    ) -> Result<RoleSummary, RoleError>;

    /// Lists every role ordered by department, then name.
    async fn list_roles(&self) -> Result<Vec<RoleSummary>, RoleError>;

    /// Assigns a role; assigning a held role is a no-op.
    async fn assign_role_to_user(
        &self,
        user_id: i32,
        role_id: i32,
    ) -> Result<UserWithRoles, RoleError>;

    /// Removes a role the user currently holds.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::NotAssigned`] when the user does not hold it.
    async fn remove_role_from_user(
        &self,
        user_id: i32,
        role_id: i32,
    ) -> Result<UserWithRoles, RoleError>;

    /// Roles held by a user, ordered by department, then name.
    async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleSummary>, RoleError>;
}
