//! `SeaORM` implementation of the `UserService` trait.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{NewUser, Store};
use crate::models::{ReportStatus, UserActiveStatus, UserReport, UserReportEntry, UserSummary};
use crate::services::password::{hash_password, verify_password};
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
    /// Verified against when an email is unknown so that path costs the
    /// same as a wrong password.
    dummy_hash: String,
}

impl SeaOrmUserService {
    pub fn new(store: Store, security: SecurityConfig) -> anyhow::Result<Self> {
        let dummy_hash = hash_password("dummy-password-for-timing", &security)
            .context("Failed to prepare dummy password hash")?;

        Ok(Self {
            store,
            security,
            dummy_hash,
        })
    }

    fn require(field: &str, value: &str) -> Result<(), UserError> {
        if value.trim().is_empty() {
            return Err(UserError::Validation(format!("{field} is required")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserSummary, UserError> {
        Self::require("username", username)?;
        Self::require("email", email)?;
        Self::require("password", password)?;

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(UserError::Conflict(format!(
                "Username '{username}' is already taken"
            )));
        }

        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(UserError::Conflict(format!(
                "Email '{email}' is already registered"
            )));
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                inactive_since: Some(Utc::now()),
            })
            .await?
            .ok_or_else(|| {
                UserError::Conflict("Username or email is already registered".to_string())
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(UserSummary::from(user))
    }

    async fn check_credentials(&self, email: &str, password: &str) -> Result<bool, UserError> {
        let user = self.store.get_user_by_email(email).await?;

        let (password_hash, known) = match user {
            Some(user) => (user.password, true),
            None => (self.dummy_hash.clone(), false),
        };

        let password = password.to_string();
        let matches = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        Ok(known && matches)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserSummary, UserError> {
        if !self.check_credentials(email, password).await? {
            return Err(UserError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.is_active() {
            return Err(UserError::AccountInactive);
        }

        Ok(UserSummary::from(user))
    }

    async fn toggle_active(&self, user_id: i32) -> Result<UserActiveStatus, UserError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        let inactive_since = if user.is_active() {
            Some(Utc::now())
        } else {
            None
        };

        let user = self
            .store
            .set_user_inactive_since(user, inactive_since)
            .await?;

        info!(
            user_id = user.id,
            is_active = user.is_active(),
            "User activity toggled"
        );

        Ok(UserActiveStatus::from(user))
    }

    async fn get_user_report(&self, status: ReportStatus) -> Result<UserReport, UserError> {
        let users: Vec<UserReportEntry> = self
            .store
            .list_users_with_roles(status.active_filter())
            .await?
            .into_iter()
            .map(|(user, roles)| UserReportEntry::new(user, roles))
            .collect();

        Ok(UserReport {
            total_users: users.len(),
            status_filter: status.to_string(),
            users,
        })
    }
}
