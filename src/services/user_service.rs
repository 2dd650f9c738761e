//! Domain service for user accounts.
//!
//! Handles registration, credential checks, the active/inactive toggle and
//! the user activity report.

use thiserror::Error;

use crate::models::{ReportStatus, UserActiveStatus, UserReport, UserSummary};

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id {0} not found")]
    NotFound(i32),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Invalid status parameter")]
    InvalidStatus(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for user accounts.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user. New accounts start inactive.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Validation`] for an empty field and
    /// [`UserError::Conflict`] when the username or email is taken.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserSummary, UserError>;

    /// Returns whether `password` matches the account registered to `email`.
    /// An unknown email yields `false` after spending the same hashing work
    /// as a real verification.
    async fn check_credentials(&self, email: &str, password: &str) -> Result<bool, UserError>;

    /// Checks credentials and that the account is active.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] or [`UserError::AccountInactive`].
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserSummary, UserError>;

    /// Flips a user between active and inactive.
    async fn toggle_active(&self, user_id: i32) -> Result<UserActiveStatus, UserError>;

    /// Builds the activity report for the given filter.
    async fn get_user_report(&self, status: ReportStatus) -> Result<UserReport, UserError>;

    /// Parses `status` and builds the report.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidStatus`] for anything other than
    /// `all`, `active` or `inactive`.
    async fn get_user_report_for(&self, status: &str) -> Result<UserReport, UserError> {
        let status = status
            .parse::<ReportStatus>()
            .map_err(|e| UserError::InvalidStatus(e.0))?;
        self.get_user_report(status).await
    }
}
