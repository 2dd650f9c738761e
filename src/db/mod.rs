use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{roles, users};

pub mod migrator;
pub mod repositories;

pub use repositories::user::NewUser;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        // Every connection to an in-memory database is its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if let Some(path_str) = db_url.strip_prefix("sqlite:")
            && !in_memory
        {
            let path_str = path_str.trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn insert_user(&self, user: NewUser) -> Result<Option<users::Model>> {
        self.user_repo().insert(user).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn set_user_inactive_since(
        &self,
        user: users::Model,
        inactive_since: Option<DateTime<Utc>>,
    ) -> Result<users::Model> {
        self.user_repo()
            .set_inactive_since(user, inactive_since)
            .await
    }

    pub async fn list_users_with_roles(
        &self,
        active: Option<bool>,
    ) -> Result<Vec<(users::Model, Vec<roles::Model>)>> {
        self.user_repo().list_with_roles(active).await
    }

    // ========================================================================
    // Roles
    // ========================================================================

    pub async fn insert_role(
        &self,
        role_name: &str,
        department_name: &str,
    ) -> Result<Option<roles::Model>> {
        self.role_repo().insert(role_name, department_name).await
    }

    pub async fn get_role(&self, role_id: i32) -> Result<Option<roles::Model>> {
        self.role_repo().get(role_id).await
    }

    pub async fn find_role(
        &self,
        role_name: &str,
        department_name: &str,
    ) -> Result<Option<roles::Model>> {
        self.role_repo()
            .find_by_name_and_department(role_name, department_name)
            .await
    }

    pub async fn list_roles(&self) -> Result<Vec<roles::Model>> {
        self.role_repo().list_all().await
    }

    pub async fn roles_for_user(&self, user_id: i32) -> Result<Vec<roles::Model>> {
        self.role_repo().list_for_user(user_id).await
    }

    #[cfg(test)]
    pub async fn is_role_assigned(&self, user_id: i32, role_id: i32) -> Result<bool> {
        self.role_repo().is_assigned(user_id, role_id).await
    }

    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<bool> {
        self.role_repo().assign(user_id, role_id).await
    }

    pub async fn unassign_role(&self, user_id: i32, role_id: i32) -> Result<bool> {
        self.role_repo().unassign(user_id, role_id).await
    }
}

/// True when the store rejected a write because of a `UNIQUE` or primary
/// key constraint.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_migrates_and_pings() {
        // Pool size is clamped, so writes and reads see the same database.
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();
        assert!(store.list_roles().await.unwrap().is_empty());

        store.insert_role("Druid", "Primal").await.unwrap();
        assert_eq!(store.list_roles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("roster-store-{}", uuid::Uuid::new_v4()));
        let db_path = dir.join("nested").join("roster.db");
        let url = format!("sqlite:{}", db_path.display());

        let store = Store::with_pool_options(&url, 2, 1).await.unwrap();
        store.ping().await.unwrap();
        assert!(db_path.exists());

        drop(store);
        std::fs::remove_dir_all(&dir).ok();
    }
}
